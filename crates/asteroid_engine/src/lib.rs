//! # Asteroid Engine
//!
//! Scene and collision core for the asteroid field.
//!
//! ## Features
//!
//! - **Spatial Hash Grid**: Uniform grid rebuilt every frame for broad-phase queries
//! - **Collision Resolution**: Sphere overlap pairs reported once per frame to both owners
//! - **Ray Casting**: Grid traversal returning the nearest sphere hit on a segment
//! - **Actor World**: Generational actor handles, per-frame integration and destruction
//! - **Configuration**: TOML or RON config files with validation
//!
//! ## Quick Start
//!
//! ```rust
//! use asteroid_engine::prelude::*;
//!
//! fn main() -> Result<(), CollisionError> {
//!     let mut world = World::new(&CollisionConfig::default())?;
//!     let ship = world.spawn_collidable(Actor::new("ship"), 1.0)?;
//!     world.spawn_collidable(Actor::new("rock").with_position(Vec3::new(0.0, 0.0, -30.0)), 2.0)?;
//!
//!     let report = world.tick(1.0 / 60.0);
//!     assert!(report.pairs.is_empty());
//!
//!     let hit = world.pick(Vec3::zeros(), -Vec3::z(), 100.0, Some(ship));
//!     assert!(hit.is_some());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod spatial;
pub mod physics;
pub mod ecs;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{CollisionConfig, WorldConfig},
        ecs::{Actor, CollisionResponse, Entity, FrameReport, World},
        foundation::math::{Transform, Vec3},
        physics::{
            Collider, ColliderId, CollisionError, CollisionPair, CollisionResolver, RayCaster,
            RayHit,
        },
        spatial::SpatialGrid,
    };
}
