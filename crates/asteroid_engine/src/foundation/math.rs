//! Math utilities and types
//!
//! Provides fundamental math types for the scene and its spatial queries.

pub use nalgebra::{
    Vector3,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Integer cell coordinate in a uniform grid
pub type CellCoord = (i32, i32, i32);

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with position and a uniform scale
    pub fn from_position_scale(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale: Vec3::new(scale, scale, scale),
            ..Default::default()
        }
    }

    /// Largest scale component, used to grow model-space bounding radii
    pub fn max_scale(&self) -> f32 {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }
}

/// Map a world position to the cell containing it
///
/// Each axis is `floor(coord / cell_size)`, so negative coordinates land in
/// negative cells (`-0.5` with cell size 1 is cell `-1`, not `0`).
#[allow(clippy::cast_possible_truncation)]
pub fn cell_of(position: &Vec3, cell_size: f32) -> CellCoord {
    (
        (position.x / cell_size).floor() as i32,
        (position.y / cell_size).floor() as i32,
        (position.z / cell_size).floor() as i32,
    )
}

/// Map a world position to its cell, or `None` when a cell index would not fit in `i32`
pub fn try_cell_of(position: &Vec3, cell_size: f32) -> Option<CellCoord> {
    #[allow(clippy::cast_precision_loss)]
    let in_range = |v: f32| {
        let cell = (v / cell_size).floor();
        cell >= i32::MIN as f32 && cell < i32::MAX as f32
    };
    (in_range(position.x) && in_range(position.y) && in_range(position.z))
        .then(|| cell_of(position, cell_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cell_of_floors_negative_coordinates() {
        assert_eq!(cell_of(&Vec3::new(0.0, 0.0, 0.0), 20.0), (0, 0, 0));
        assert_eq!(cell_of(&Vec3::new(19.9, 5.0, 5.0), 20.0), (0, 0, 0));
        assert_eq!(cell_of(&Vec3::new(20.0, -0.1, -20.0), 20.0), (1, -1, -1));
        assert_eq!(cell_of(&Vec3::new(-20.1, 0.0, 0.0), 20.0), (-2, 0, 0));
    }

    #[test]
    fn test_try_cell_of_rejects_unrepresentable_cells() {
        assert_eq!(try_cell_of(&Vec3::new(-25.0, 0.0, 39.0), 20.0), Some((-2, 0, 1)));
        assert_eq!(try_cell_of(&Vec3::new(3.0e9, 0.0, 0.0), 1.0), None);
        assert_eq!(try_cell_of(&Vec3::new(0.0, -3.0e9, 0.0), 1.0), None);
        assert_eq!(try_cell_of(&Vec3::new(0.0, 0.0, f32::NAN), 1.0), None);
    }

    #[test]
    fn test_transform_max_scale() {
        let transform = Transform::from_position_scale(Vec3::new(1.0, 2.0, 3.0), 2.0);
        assert_relative_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(transform.max_scale(), 2.0);
    }
}
