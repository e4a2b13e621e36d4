//! # Scene Configuration
//!
//! Configuration for the collision core and for the asteroid field that the
//! demo builds on top of it. Both structures serialize to TOML or RON through
//! the [`Config`] trait.
//!
//! ## Tuning the grid
//!
//! `cell_size` should be about twice the largest collider radius in the scene.
//! Two spheres can then only overlap if their centres share a cell or sit in
//! neighbouring cells, which is what the 3×3×3 neighbourhood query covers.
//! The grid does not enforce this; oversized colliders simply miss pairs.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// Default grid cell edge length, in world units
pub const DEFAULT_CELL_SIZE: f32 = 20.0;

/// Collision core configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Edge length of one cubic grid cell. Fixed for the lifetime of a grid.
    pub cell_size: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Config for CollisionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be a positive finite number, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }
}

/// # World Configuration
///
/// Parameters for populating and simulating the asteroid field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Collision grid settings
    pub collision: CollisionConfig,
    /// Number of asteroids spawned at start-up
    pub asteroid_count: u32,
    /// Asteroids spawn inside the cube `[-extent/2, extent/2]³`
    pub spawn_extent: f32,
    /// Smallest asteroid bounding radius
    pub min_asteroid_radius: f32,
    /// Largest asteroid bounding radius
    pub max_asteroid_radius: f32,
    /// Upper bound on asteroid drift speed (units per second)
    pub max_asteroid_speed: f32,
    /// Length of the pawn's forward pick ray
    pub pick_distance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            collision: CollisionConfig::default(),
            asteroid_count: 128,
            spawn_extent: 128.0,
            min_asteroid_radius: 0.5,
            max_asteroid_radius: 5.0,
            max_asteroid_speed: 2.0,
            pick_distance: 200.0,
        }
    }
}

impl Config for WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()?;

        if !(self.spawn_extent.is_finite() && self.spawn_extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn_extent must be positive, got {}",
                self.spawn_extent
            )));
        }
        if !(self.min_asteroid_radius >= 0.0 && self.min_asteroid_radius <= self.max_asteroid_radius) {
            return Err(ConfigError::Invalid(format!(
                "asteroid radius range [{}, {}] is empty or negative",
                self.min_asteroid_radius, self.max_asteroid_radius
            )));
        }
        if self.max_asteroid_radius * 2.0 > self.collision.cell_size {
            log::warn!(
                "max_asteroid_radius {} exceeds half the cell size {}; some overlaps may be missed",
                self.max_asteroid_radius,
                self.collision.cell_size
            );
        }
        if !(self.max_asteroid_speed >= 0.0 && self.pick_distance >= 0.0) {
            return Err(ConfigError::Invalid(
                "max_asteroid_speed and pick_distance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
