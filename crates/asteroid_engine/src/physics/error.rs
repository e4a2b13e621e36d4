//! Error types for the spatial and collision subsystems

use crate::ecs::Entity;

/// Errors raised while configuring grids, colliders or the world that owns them
///
/// Bookkeeping bugs (a collider whose owner cannot be found) are not listed
/// here: they panic, since no caller can recover from them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Grid cell size was zero, negative, or not finite
    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    /// Collider radius was negative or not finite
    #[error("collider radius must be a non-negative finite number, got {0}")]
    InvalidRadius(f32),

    /// A bounding sphere was requested for an empty set of points
    #[error("cannot build a bounding sphere from zero points")]
    EmptyPointCloud,

    /// The actor handle does not refer to a live actor
    #[error("no live actor for {0:?}")]
    UnknownEntity(Entity),
}
