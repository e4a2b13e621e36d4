//! World-level tests: spawning, collision frames, destruction and picking

use crate::core::config::CollisionConfig;
use crate::ecs::{Actor, CollisionResponse, World};
use crate::foundation::math::Vec3;
use crate::physics::error::CollisionError;
use approx::assert_relative_eq;

fn world() -> World {
    World::new(&CollisionConfig { cell_size: 20.0 }).unwrap()
}

fn rock(x: f32, y: f32, z: f32) -> Actor {
    Actor::new("rock").with_position(Vec3::new(x, y, z))
}

#[test]
fn test_rejects_invalid_cell_size() {
    let err = World::new(&CollisionConfig { cell_size: 0.0 }).unwrap_err();
    assert_eq!(err, CollisionError::InvalidCellSize(0.0));
}

#[test]
fn test_overlapping_actors_notified_both_ways() {
    let mut world = world();
    let a = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    let b = world.spawn_collidable(rock(1.5, 0.0, 0.0), 1.0).unwrap();

    let report = world.tick(0.0);

    assert_eq!(report.frame, 1);
    assert_eq!(report.pairs.len(), 1);
    assert!(report.pairs[0].involves(&a) && report.pairs[0].involves(&b));

    let actor_a = world.actor(a).unwrap();
    let actor_b = world.actor(b).unwrap();
    assert_eq!(actor_a.collision_count(), 1);
    assert_eq!(actor_b.collision_count(), 1);
    assert_relative_eq!(actor_a.last_collision_direction(), -Vec3::x());
    assert_relative_eq!(actor_b.last_collision_direction(), Vec3::x());
}

#[test]
fn test_separated_actors_not_notified() {
    let mut world = world();
    let a = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    world.spawn_collidable(rock(3.0, 0.0, 0.0), 1.0).unwrap();

    let report = world.tick(0.0);

    assert!(report.pairs.is_empty());
    assert_eq!(world.actor(a).unwrap().collision_count(), 0);
}

#[test]
fn test_overlap_repeats_every_frame() {
    let mut world = world();
    let a = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    world.spawn_collidable(rock(1.0, 0.0, 0.0), 1.0).unwrap();

    for _ in 0..3 {
        world.tick(0.016);
    }
    assert_eq!(world.actor(a).unwrap().collision_count(), 3);
    assert_eq!(world.frame(), 3);
}

#[test]
fn test_movement_brings_actors_into_contact() {
    let mut world = world();
    let mover = world
        .spawn_collidable(rock(-10.0, 0.0, 0.0).with_velocity(Vec3::new(10.0, 0.0, 0.0)), 1.0)
        .unwrap();
    world.spawn_collidable(rock(0.0, 0.0, 0.0).with_tick(false), 1.0).unwrap();

    assert!(world.tick(0.5).pairs.is_empty());
    assert_relative_eq!(world.actor(mover).unwrap().position(), Vec3::new(-5.0, 0.0, 0.0));

    assert_eq!(world.tick(0.45).pairs.len(), 1);
}

#[test]
fn test_actors_without_collider_never_collide() {
    let mut world = world();
    let ghost = world.spawn_actor(rock(0.0, 0.0, 0.0));
    world.spawn_collidable(rock(0.1, 0.0, 0.0), 1.0).unwrap();

    let report = world.tick(0.0);
    assert!(report.pairs.is_empty());
    assert_eq!(world.collision_stats().colliders, 1);
    assert!(world.actor(ghost).unwrap().collider().is_none());
}

#[test]
fn test_destroy_on_contact_sweeps_after_dispatch() {
    let mut world = world();
    let fragile = world
        .spawn_collidable(
            rock(0.0, 0.0, 0.0).with_response(CollisionResponse::DestroyOnContact),
            1.0,
        )
        .unwrap();
    let sturdy = world.spawn_collidable(rock(1.0, 0.0, 0.0), 1.0).unwrap();

    let report = world.tick(0.0);

    // Both sides were notified before the sweep
    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.despawned, vec![fragile]);
    assert!(world.actor(fragile).is_none());
    assert_eq!(world.actor(sturdy).unwrap().collision_count(), 1);
    assert_eq!(world.actor_count(), 1);

    assert!(world.tick(0.0).pairs.is_empty());
}

#[test]
fn test_manual_destroy_is_swept() {
    let mut world = world();
    let a = world.spawn_actor(rock(0.0, 0.0, 0.0));
    world.actor_mut(a).unwrap().destroy();

    let report = world.tick(0.0);
    assert_eq!(report.despawned, vec![a]);
    assert_eq!(world.actor_count(), 0);
}

#[test]
fn test_set_collider_issues_fresh_ids() {
    let mut world = world();
    let a = world.spawn_actor(rock(0.0, 0.0, 0.0));

    let first = world.set_collider(a, 1.0).unwrap();
    let second = world.set_collider(a, 2.0).unwrap();
    assert_ne!(first, second);
    assert_eq!(world.actor(a).unwrap().collider().map(|c| c.id), Some(second));

    let removed = world.clear_collider(a).unwrap();
    assert_eq!(removed.map(|c| c.id), Some(second));
    assert!(world.actor(a).unwrap().collider().is_none());
}

#[test]
fn test_fit_collider_uses_actor_scale() {
    use crate::foundation::math::Transform;

    let mut world = world();
    let a = world.spawn_actor(
        Actor::new("scaled").with_transform(Transform::from_position_scale(Vec3::zeros(), 3.0)),
    );
    let points = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];

    world.fit_collider(a, &points).unwrap();
    assert_relative_eq!(world.actor(a).unwrap().collider().unwrap().radius, 3.0);
    assert_eq!(world.fit_collider(a, &[]), Err(CollisionError::EmptyPointCloud));
}

#[test]
fn test_spawned_clone_gets_its_own_collider() {
    let mut world = world();
    let original = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    let copy = world.actor(original).unwrap().clone().with_position(Vec3::new(0.5, 0.0, 0.0));
    let clone = world.spawn_actor(copy);

    let id_of = |entity| world.actor(entity).unwrap().collider().map(|c| c.id);
    assert!(id_of(clone).is_some());
    assert_ne!(id_of(original), id_of(clone));

    let report = world.tick(0.0);
    assert_eq!(report.pairs.len(), 1);
    assert!(report.pairs[0].involves(&original) && report.pairs[0].involves(&clone));
    assert_eq!(world.collision_stats().colliders, 2);
}

#[test]
fn test_operations_on_removed_actor_fail() {
    let mut world = world();
    let a = world.spawn_actor(rock(0.0, 0.0, 0.0));
    assert!(world.remove_actor(a).is_some());

    assert_eq!(world.set_collider(a, 1.0), Err(CollisionError::UnknownEntity(a)));
    assert_eq!(world.clear_collider(a), Err(CollisionError::UnknownEntity(a)));
    assert!(world.remove_actor(a).is_none());
}

#[test]
fn test_invalid_radius_spawns_nothing() {
    let mut world = world();
    assert_eq!(
        world.spawn_collidable(rock(0.0, 0.0, 0.0), -1.0),
        Err(CollisionError::InvalidRadius(-1.0))
    );
    assert_eq!(world.actor_count(), 0);
}

#[test]
fn test_raycast_hits_actor() {
    let mut world = world();
    let target = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    world.tick(0.0);

    let hit = world
        .raycast(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), None)
        .expect("ray should hit");
    assert_eq!(hit.owner, target);
    assert_relative_eq!(hit.point, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-4);
    assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-4);
    assert_relative_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-4);

    let origin = Vec3::new(0.5, 0.5, 0.5);
    assert!(world.raycast(origin, origin, None).is_none());
}

#[test]
fn test_pick_ignores_shooter() {
    let mut world = world();
    let pawn = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    let target = world.spawn_collidable(rock(0.0, 0.0, -50.0), 2.0).unwrap();
    world.refresh_grid();

    let forward = Vec3::new(0.0, 0.0, -1.0);
    assert_eq!(world.pick(Vec3::zeros(), forward, 100.0, Some(pawn)).map(|h| h.owner), Some(target));
    assert!(world.pick(Vec3::zeros(), forward, 40.0, Some(pawn)).is_none());
    assert!(world.pick(Vec3::zeros(), Vec3::zeros(), 100.0, Some(pawn)).is_none());
}

#[test]
fn test_raycast_only_target_ignored() {
    let mut world = world();
    let only = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    world.refresh_grid();

    assert!(world
        .raycast(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), Some(only))
        .is_none());
}

#[test]
fn test_raycast_skips_removed_actor() {
    let mut world = world();
    let gone = world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    world.refresh_grid();
    world.remove_actor(gone);

    assert!(world
        .raycast(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), None)
        .is_none());
}

#[test]
fn test_raycast_before_rebuild_sees_nothing() {
    let mut world = world();
    world.spawn_collidable(rock(0.0, 0.0, 0.0), 1.0).unwrap();
    assert!(world
        .raycast(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), None)
        .is_none());
}
