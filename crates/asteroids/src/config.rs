//! Demo configuration

use asteroid_engine::prelude::*;
use serde::{Deserialize, Serialize};

/// Settings for a headless run of the asteroid field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Scene settings
    pub world: WorldConfig,

    /// Number of frames to simulate
    pub frames: u32,

    /// Fixed time step per frame (seconds)
    pub time_step: f32,

    /// RNG seed for the asteroid field; random when unset
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            frames: 600,
            time_step: 1.0 / 60.0,
            seed: None,
        }
    }
}

impl Config for DemoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        Ok(())
    }
}
