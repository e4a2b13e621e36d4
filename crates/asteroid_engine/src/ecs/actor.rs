//! Actors: the scene objects that own colliders
//!
//! An actor is a transform plus a little game state. Collision geometry is
//! optional and is attached through [`World::set_collider`](super::World::set_collider)
//! so that the world can keep collider ids unique.

use crate::ecs::components::ColliderComponent;
use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::Collider;

/// What an actor does when it is told about an overlap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Notification is dropped
    Ignore,
    /// Remember the contact direction and count it
    #[default]
    Record,
    /// Record the contact, then mark the actor for destruction
    DestroyOnContact,
}

/// A scene object
#[derive(Debug, Clone)]
pub struct Actor {
    /// Display name, used in logs
    pub name: String,

    /// World-space transform. The collider is centred on `transform.position`.
    pub transform: Transform,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Whether [`World::tick`](super::World::tick) integrates this actor
    pub tick_enabled: bool,

    /// Reaction to overlap notifications
    pub collision_response: CollisionResponse,

    pub(crate) collider: Option<ColliderComponent>,
    pending_destroy: bool,
    last_collision_direction: Vec3,
    collision_count: u32,
}

impl Actor {
    /// Create a ticking actor at the origin with no collider
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            velocity: Vec3::zeros(),
            tick_enabled: true,
            collision_response: CollisionResponse::default(),
            collider: None,
            pending_destroy: false,
            last_collision_direction: Vec3::zeros(),
            collision_count: 0,
        }
    }

    /// Set the transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the position, keeping rotation and scale
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the collision response
    pub fn with_response(mut self, response: CollisionResponse) -> Self {
        self.collision_response = response;
        self
    }

    /// Enable or disable per-frame integration
    pub fn with_tick(mut self, enabled: bool) -> Self {
        self.tick_enabled = enabled;
        self
    }

    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Attached collider, if any
    pub fn collider(&self) -> Option<&ColliderComponent> {
        self.collider.as_ref()
    }

    /// Grid snapshot of the collider at the current position
    pub fn collider_snapshot(&self) -> Option<Collider> {
        self.collider.map(|c| c.snapshot(self.transform.position))
    }

    /// Advance the actor by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        if self.tick_enabled {
            self.transform.position += self.velocity * delta_time;
        }
    }

    /// Overlap notification from the collision pass
    ///
    /// `other_position` is the other actor's position at the time of the pass.
    pub fn on_collision(&mut self, other_position: Vec3) {
        if self.collision_response == CollisionResponse::Ignore {
            return;
        }

        // Points from the other actor towards this one; zero when co-located
        self.last_collision_direction = (self.transform.position - other_position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros);
        self.collision_count += 1;

        if self.collision_response == CollisionResponse::DestroyOnContact {
            self.destroy();
        }
    }

    /// Mark the actor for removal at the end of the current frame
    pub fn destroy(&mut self) {
        self.pending_destroy = true;
    }

    /// Whether the actor will be removed at the end of the frame
    pub fn is_pending_destroy(&self) -> bool {
        self.pending_destroy
    }

    /// Unit direction from the last actor this one collided with, towards this one
    pub fn last_collision_direction(&self) -> Vec3 {
        self.last_collision_direction
    }

    /// Number of overlap notifications recorded over the actor's lifetime
    pub fn collision_count(&self) -> u32 {
        self.collision_count
    }
}
