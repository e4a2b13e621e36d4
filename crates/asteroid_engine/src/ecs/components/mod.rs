//! ECS Components module
//!
//! Data attached to actors beyond their transform

pub mod collision;

pub use collision::ColliderComponent;
