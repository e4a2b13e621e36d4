//! Spatial partitioning data structures
//!
//! Provides the uniform hash grid used for broad-phase collision detection
//! and ray traversal.

mod spatial_grid;

pub use spatial_grid::SpatialGrid;
