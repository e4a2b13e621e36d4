//! ECS World implementation
//!
//! The world owns every actor and the collision state derived from them. Each
//! [`World::tick`] runs the frame in a fixed order:
//!
//! 1. integrate actor velocities
//! 2. rebuild the spatial grid and resolve overlaps, notifying both actors
//! 3. remove actors that were marked for destruction
//!
//! Ray casts read the grid left behind by the last rebuild, so they see actor
//! positions as of that rebuild.

use std::collections::HashMap;

use crate::core::config::CollisionConfig;
use crate::ecs::components::ColliderComponent;
use crate::ecs::{Actor, Entity};
use crate::foundation::collections::HandleMap;
use crate::foundation::math::Vec3;
use crate::physics::collision::{Collider, ColliderId, RayHit};
use crate::physics::collision_system::{CollisionPair, CollisionResolver, ResolverStats};
use crate::physics::error::CollisionError;
use crate::physics::raycast::RayCaster;
use crate::spatial::SpatialGrid;

/// Outcome of one [`World::tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1 for the first tick
    pub frame: u64,
    /// Overlapping actor pairs found this frame
    pub pairs: Vec<CollisionPair<Entity>>,
    /// Actors removed at the end of the frame
    pub despawned: Vec<Entity>,
}

/// Scene registry: actors, their colliders and the grid built from them
#[derive(Debug)]
pub struct World {
    actors: HandleMap<Actor>,
    grid: SpatialGrid,
    resolver: CollisionResolver,
    /// Owner of every collider in `grid`, rebuilt together with it
    grid_owners: HashMap<ColliderId, Entity>,
    next_collider_id: u32,
    frame: u64,
}

impl World {
    /// Create an empty world
    pub fn new(config: &CollisionConfig) -> Result<Self, CollisionError> {
        Ok(Self {
            actors: HandleMap::with_key(),
            grid: SpatialGrid::from_config(config)?,
            resolver: CollisionResolver::new(),
            grid_owners: HashMap::new(),
            next_collider_id: 0,
            frame: 0,
        })
    }

    /// Add an actor to the scene
    ///
    /// An actor that already carries a collider (a clone of a live actor, or
    /// one taken back from [`World::remove_actor`]) gets a fresh [`ColliderId`],
    /// so no two live actors share an id.
    pub fn spawn_actor(&mut self, mut actor: Actor) -> Entity {
        if let Some(collider) = actor.collider {
            actor.collider = Some(ColliderComponent {
                id: self.issue_collider_id(),
                ..collider
            });
        }
        let name = actor.name.clone();
        let entity = self.actors.insert(actor);
        log::debug!("Spawned actor '{name}' as {entity:?}");
        entity
    }

    /// Add an actor with a sphere collider of `radius`
    ///
    /// Nothing is spawned if the radius is invalid.
    pub fn spawn_collidable(&mut self, actor: Actor, radius: f32) -> Result<Entity, CollisionError> {
        let collider = ColliderComponent::new(self.issue_collider_id(), radius)?;
        let entity = self.spawn_actor(actor);
        if let Some(actor) = self.actors.get_mut(entity) {
            actor.collider = Some(collider);
        }
        Ok(entity)
    }

    /// Attach a sphere collider of `radius` to an actor, replacing any existing one
    ///
    /// Every call issues a fresh [`ColliderId`]. The new collider takes part in
    /// collision from the next grid rebuild.
    pub fn set_collider(&mut self, entity: Entity, radius: f32) -> Result<ColliderId, CollisionError> {
        if !self.actors.contains_key(entity) {
            return Err(CollisionError::UnknownEntity(entity));
        }
        let collider = ColliderComponent::new(self.issue_collider_id(), radius)?;
        self.install_collider(entity, collider)
    }

    /// Attach a collider fitted to model-space `points`, scaled by the actor's transform
    pub fn fit_collider(&mut self, entity: Entity, points: &[Vec3]) -> Result<ColliderId, CollisionError> {
        let transform = self
            .actors
            .get(entity)
            .map(|actor| actor.transform.clone())
            .ok_or(CollisionError::UnknownEntity(entity))?;
        let collider = ColliderComponent::from_points(self.issue_collider_id(), points, &transform)?;
        self.install_collider(entity, collider)
    }

    /// Detach an actor's collider, returning it
    pub fn clear_collider(&mut self, entity: Entity) -> Result<Option<ColliderComponent>, CollisionError> {
        let actor = self
            .actors
            .get_mut(entity)
            .ok_or(CollisionError::UnknownEntity(entity))?;
        Ok(actor.collider.take())
    }

    /// Remove an actor immediately
    ///
    /// Its collider stays in the grid until the next rebuild, but ray casts
    /// never report removed actors.
    pub fn remove_actor(&mut self, entity: Entity) -> Option<Actor> {
        let actor = self.actors.remove(entity)?;
        log::debug!("Removed actor '{}' ({entity:?})", actor.name);
        Some(actor)
    }

    /// Look up a live actor
    pub fn actor(&self, entity: Entity) -> Option<&Actor> {
        self.actors.get(entity)
    }

    /// Look up a live actor mutably
    pub fn actor_mut(&mut self, entity: Entity) -> Option<&mut Actor> {
        self.actors.get_mut(entity)
    }

    /// Iterate over all live actors
    pub fn actors(&self) -> impl Iterator<Item = (Entity, &Actor)> {
        self.actors.iter()
    }

    /// Number of live actors
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Grid as of the last rebuild
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Counters from the last collision pass
    pub fn collision_stats(&self) -> ResolverStats {
        self.resolver.last_stats()
    }

    /// Number of completed ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Rebuild the grid from current actor positions without resolving collisions
    ///
    /// Useful for ray casts against a freshly populated scene before the first tick.
    pub fn refresh_grid(&mut self) {
        let snapshot = self.collider_snapshot();
        self.grid.clear();
        for collider in snapshot.iter().filter_map(|(_, collider)| *collider) {
            self.grid.add(collider);
        }
        self.record_owners(&snapshot);
        log::trace!(
            "Grid refreshed: {} colliders in {} cells",
            self.grid.len(),
            self.grid.cell_count()
        );
    }

    /// Run one frame of `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) -> FrameReport {
        self.frame += 1;

        for (_, actor) in &mut self.actors {
            actor.tick(delta_time);
        }

        let snapshot = self.collider_snapshot();
        self.record_owners(&snapshot);
        let positions: HashMap<Entity, Vec3> = snapshot
            .iter()
            .filter_map(|(entity, collider)| collider.map(|c| (*entity, c.position)))
            .collect();

        let actors = &mut self.actors;
        let pairs = self.resolver.resolve_frame(&mut self.grid, snapshot, |receiver, other| {
            if let (Some(actor), Some(&other_position)) = (actors.get_mut(receiver), positions.get(&other)) {
                actor.on_collision(other_position);
            }
        });

        let despawned: Vec<Entity> = self
            .actors
            .iter()
            .filter(|(_, actor)| actor.is_pending_destroy())
            .map(|(entity, _)| entity)
            .collect();
        for &entity in &despawned {
            if let Some(actor) = self.actors.remove(entity) {
                log::debug!("Destroyed actor '{}' ({entity:?})", actor.name);
            }
        }

        if !despawned.is_empty() {
            log::info!(
                "Frame {}: {} overlaps, {} actors destroyed, {} remaining",
                self.frame,
                pairs.len(),
                despawned.len(),
                self.actors.len()
            );
        }

        FrameReport {
            frame: self.frame,
            pairs,
            despawned,
        }
    }

    /// First actor hit by the segment `origin -> end`, skipping `ignore`
    ///
    /// Reads the grid from the last rebuild. Actors removed since then are
    /// never reported.
    pub fn raycast(&self, origin: Vec3, end: Vec3, ignore: Option<Entity>) -> Option<RayHit<Entity>> {
        RayCaster::new(&self.grid).cast_filtered(origin, end, &self.grid_owners, |owner| {
            Some(owner) != ignore && self.actors.contains_key(owner)
        })
    }

    /// Ray cast `distance` units along `forward` from `origin`
    ///
    /// Returns `None` if `forward` has no direction.
    pub fn pick(
        &self,
        origin: Vec3,
        forward: Vec3,
        distance: f32,
        ignore: Option<Entity>,
    ) -> Option<RayHit<Entity>> {
        let direction = forward.try_normalize(f32::EPSILON)?;
        self.raycast(origin, origin + direction * distance, ignore)
    }

    fn issue_collider_id(&mut self) -> ColliderId {
        let id = ColliderId::new(self.next_collider_id);
        self.next_collider_id += 1;
        id
    }

    fn install_collider(&mut self, entity: Entity, collider: ColliderComponent) -> Result<ColliderId, CollisionError> {
        let actor = self
            .actors
            .get_mut(entity)
            .ok_or(CollisionError::UnknownEntity(entity))?;
        actor.collider = Some(collider);
        Ok(collider.id)
    }

    fn collider_snapshot(&self) -> Vec<(Entity, Option<Collider>)> {
        self.actors
            .iter()
            .map(|(entity, actor)| (entity, actor.collider_snapshot()))
            .collect()
    }

    fn record_owners(&mut self, snapshot: &[(Entity, Option<Collider>)]) {
        self.grid_owners.clear();
        self.grid_owners.extend(
            snapshot
                .iter()
                .filter_map(|(entity, collider)| collider.map(|c| (c.id, *entity))),
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            actors: HandleMap::with_key(),
            grid: SpatialGrid::default(),
            resolver: CollisionResolver::new(),
            grid_owners: HashMap::new(),
            next_collider_id: 0,
            frame: 0,
        }
    }
}
