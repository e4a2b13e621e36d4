//! # Core Engine Module
//!
//! Shared configuration used by the spatial and physics subsystems and by the
//! scene that owns them.
//!
//! ## Organization
//!
//! - **Config**: Collision and world configuration, loadable from TOML or RON

pub mod config;

// Re-export commonly used config types
pub use config::{
    CollisionConfig,
    WorldConfig,
    Config,
    ConfigError,
};
