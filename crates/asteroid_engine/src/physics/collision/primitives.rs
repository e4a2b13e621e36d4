//! Primitive collision shapes and intersection algorithms
//!
//! Provides the geometric building blocks of the collision core: the
//! per-frame collider snapshot, bounding spheres and finite ray segments.

use std::fmt;

use crate::foundation::math::Vec3;
use crate::physics::error::CollisionError;

/// Stable identity of a collider, used as the hash/equality key in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(u32);

impl ColliderId {
    /// Wrap a raw collider id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collider#{}", self.0)
    }
}

/// Snapshot of a collidable object: identity, world position and bounding radius
///
/// The grid stores these by value, so queries see positions as they were at
/// the last rebuild rather than live positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Identity of the collider
    pub id: ColliderId,
    /// World-space centre of the bounding sphere
    pub position: Vec3,
    /// Bounding sphere radius, used by both broad and narrow phase
    pub radius: f32,
}

impl Collider {
    /// Create a collider snapshot, rejecting negative or non-finite radii
    pub fn new(id: ColliderId, position: Vec3, radius: f32) -> Result<Self, CollisionError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(CollisionError::InvalidRadius(radius));
        }
        Ok(Self { id, position, radius })
    }

    /// Bounding sphere of this collider
    pub fn sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }

    /// Narrow-phase overlap test against another collider
    pub fn overlaps(&self, other: &Self) -> bool {
        self.sphere().intersects(&other.sphere())
    }
}

/// A finite ray segment for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// Unit direction from origin towards the end point
    pub direction: Vec3,
    /// Distance from origin to the end point
    pub length: f32,
}

impl Ray {
    /// Build the segment `origin -> end`
    ///
    /// Returns `None` when the two points coincide (or the length is not
    /// finite), since no direction can be derived.
    pub fn segment(origin: Vec3, end: Vec3) -> Option<Self> {
        let delta = end - origin;
        let length = delta.magnitude();
        if !length.is_finite() || length <= 0.0 {
            return None;
        }
        Some(Self {
            origin,
            direction: delta / length,
            length,
        })
    }

    /// End point of the segment
    pub fn end(&self) -> Vec3 {
        self.point_at(self.length)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<O> {
    /// The object owning the collider that was hit
    pub owner: O,
    /// The collider that was hit
    pub collider: ColliderId,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Fit a sphere around a point cloud (typically mesh vertices in model space)
    ///
    /// The centre is the midpoint of the axis-aligned extremes and the radius
    /// is the largest distance from that centre to any point. This is not the
    /// minimal enclosing sphere, but it always contains every point.
    pub fn from_points(points: &[Vec3]) -> Result<Self, CollisionError> {
        let first = points.first().ok_or(CollisionError::EmptyPointCloud)?;

        let (min, max) = points.iter().fold((*first, *first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        let center = (min + max) * 0.5;

        let radius_squared = points
            .iter()
            .map(|p| (p - center).magnitude_squared())
            .fold(0.0_f32, f32::max);

        Ok(Self::new(center, radius_squared.sqrt()))
    }

    /// Check if this sphere overlaps another
    ///
    /// Spheres that exactly touch (`distance == r1 + r2`) do not overlap.
    /// Compares squared distances; no square root is taken.
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }

    /// Distance along `ray` to the first intersection with this sphere
    ///
    /// Uses the geometric form: project the centre onto the ray (`tca`), then
    /// step back by the half-chord (`thc`). Spheres whose centre projects
    /// behind the origin are rejected outright, including the case where the
    /// origin is inside the sphere and the ray points away from its centre.
    /// Hits past the end of the segment are rejected.
    pub fn intersect_segment(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        let tca = to_center.dot(&ray.direction);
        if tca < 0.0 {
            return None;
        }

        let radius_squared = self.radius * self.radius;
        let d2 = to_center.magnitude_squared() - tca * tca;
        if d2 > radius_squared {
            return None;
        }

        let thc = (radius_squared - d2).sqrt();
        let t0 = tca - thc;
        let t_hit = if t0 >= 0.0 { t0 } else { tca + thc };
        if t_hit < 0.0 || t_hit > ray.length {
            return None;
        }
        Some(t_hit)
    }

    /// Outward surface normal at a point on the sphere
    ///
    /// Degenerate (zero-radius) spheres report the normal facing back along
    /// `incoming`.
    pub fn normal_at(&self, point: Vec3, incoming: Vec3) -> Vec3 {
        if self.radius > 0.0 {
            (point - self.center) / self.radius
        } else {
            -incoming
        }
    }
}
