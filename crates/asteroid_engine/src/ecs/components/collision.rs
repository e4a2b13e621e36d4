//! Collision component for actors
//!
//! Based on Game Engine Architecture 3rd Edition:
//! - Section 13.3: Collision Detection System
//! - Section 16.2: Component-based architecture

use crate::foundation::math::{Transform, Vec3};
use crate::physics::collision::{BoundingSphere, Collider, ColliderId};
use crate::physics::error::CollisionError;

/// Marks an actor as collidable
///
/// Holds the collider's identity and world-space bounding radius. The sphere
/// is always centred on the owning actor's position; the grid snapshot is
/// taken from here every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderComponent {
    /// Identity used in the spatial grid
    pub id: ColliderId,

    /// Cached bounding sphere radius for broad and narrow phase
    /// GEA 13.3.2: "Hierarchical bounding volumes" for broad-phase optimization
    pub radius: f32,
}

impl ColliderComponent {
    /// Create a collider with an explicit radius
    pub fn new(id: ColliderId, radius: f32) -> Result<Self, CollisionError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(CollisionError::InvalidRadius(radius));
        }
        Ok(Self { id, radius })
    }

    /// Fit a collider to model-space vertices scaled by `transform`
    ///
    /// The radius is the point cloud's bounding radius grown by the largest
    /// scale component. The local centre offset is dropped: the sphere stays
    /// centred on the actor.
    pub fn from_points(
        id: ColliderId,
        points: &[Vec3],
        transform: &Transform,
    ) -> Result<Self, CollisionError> {
        let sphere = BoundingSphere::from_points(points)?;
        Self::new(id, sphere.radius * transform.max_scale())
    }

    /// Grid snapshot of this collider at `position`
    pub fn snapshot(&self, position: Vec3) -> Collider {
        Collider {
            id: self.id,
            position,
            radius: self.radius,
        }
    }
}
