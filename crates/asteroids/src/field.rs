//! Asteroid field set-up

use asteroid_engine::prelude::*;
use rand::Rng;

/// Ship hull in model space; the pawn's collider is fitted to it
const SHIP_HULL: [[f32; 3]; 6] = [
    [0.0, 0.0, -1.5],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.8],
    [1.0, 0.0, 0.8],
    [0.0, 0.4, 0.6],
    [0.0, -0.2, 0.6],
];

/// Spawn the player's ship at the origin, facing -z
pub fn spawn_pawn(world: &mut World) -> Result<Entity, CollisionError> {
    let pawn = world.spawn_actor(
        Actor::new("pawn")
            .with_transform(Transform::from_position_scale(Vec3::zeros(), 2.0))
            .with_tick(false),
    );
    let hull: Vec<Vec3> = SHIP_HULL.iter().map(|&[x, y, z]| Vec3::new(x, y, z)).collect();
    world.fit_collider(pawn, &hull)?;
    Ok(pawn)
}

/// Scatter `config.asteroid_count` drifting asteroids through the spawn cube
///
/// Asteroids are destroyed on their first contact.
pub fn spawn_asteroids<R: Rng>(
    world: &mut World,
    config: &WorldConfig,
    rng: &mut R,
) -> Result<Vec<Entity>, CollisionError> {
    let half = config.spawn_extent * 0.5;
    let mut asteroids = Vec::with_capacity(config.asteroid_count as usize);

    for i in 0..config.asteroid_count {
        let position = Vec3::new(
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
        );
        let velocity = random_direction(rng) * rng.gen_range(0.0..=config.max_asteroid_speed);
        let radius = rng.gen_range(config.min_asteroid_radius..=config.max_asteroid_radius);

        let asteroid = Actor::new(format!("asteroid-{i}"))
            .with_position(position)
            .with_velocity(velocity)
            .with_response(CollisionResponse::DestroyOnContact);
        asteroids.push(world.spawn_collidable(asteroid, radius)?);
    }

    log::info!(
        "Spawned {} asteroids in a {:.0}-unit cube",
        asteroids.len(),
        config.spawn_extent
    );
    Ok(asteroids)
}

fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if let Some(unit) = v.try_normalize(1e-3) {
            if v.magnitude_squared() <= 1.0 {
                return unit;
            }
        }
    }
}
