//! Headless asteroid field
//!
//! Spawns a drifting asteroid field around a stationary ship, runs a fixed
//! number of frames and fires the ship's forward pick ray every frame.
//!
//! Usage: `asteroids [config.toml|config.ron]`

mod config;
mod field;

use asteroid_engine::foundation::logging;
use asteroid_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DemoConfig;

const DEFAULT_CONFIG_PATH: &str = "asteroids.toml";

/// Frames between progress summaries
const REPORT_INTERVAL: u64 = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = DemoConfig::load_or_default(&config_path);
    config.validate()?;

    log::info!("Starting asteroid field demo ({} frames)", config.frames);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut world = World::new(&config.world.collision)?;
    let pawn = field::spawn_pawn(&mut world)?;
    field::spawn_asteroids(&mut world, &config.world, &mut rng)?;

    let mut destroyed = 0_usize;
    let mut overlaps = 0_usize;
    let mut last_target: Option<Entity> = None;

    for _ in 0..config.frames {
        let report = world.tick(config.time_step);
        destroyed += report.despawned.len();
        overlaps += report.pairs.len();

        if let Some(pawn_actor) = world.actor(pawn) {
            let origin = pawn_actor.position();
            let forward = pawn_actor.transform.rotation * -Vec3::z();
            let hit = world.pick(origin, forward, config.world.pick_distance, Some(pawn));

            let target = hit.map(|h| h.owner);
            if target != last_target {
                match hit.and_then(|h| world.actor(h.owner).map(|a| (h, a))) {
                    Some((h, actor)) => log::info!(
                        "Frame {}: targeting '{}' at {:.1} units",
                        report.frame,
                        actor.name,
                        h.distance
                    ),
                    None => log::info!("Frame {}: no target", report.frame),
                }
                last_target = target;
            }
        }

        if report.frame % REPORT_INTERVAL == 0 {
            let stats = world.collision_stats();
            log::info!(
                "Frame {}: {} actors, {} colliders in {} cells, {} candidate pairs",
                report.frame,
                world.actor_count(),
                stats.colliders,
                stats.cells,
                stats.candidate_tests
            );
        }
    }

    log::info!(
        "Finished after {} frames: {} overlaps, {} asteroids destroyed, {} actors remain",
        world.frame(),
        overlaps,
        destroyed,
        world.actor_count()
    );
    Ok(())
}
