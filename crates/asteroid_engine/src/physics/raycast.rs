//! Grid-accelerated ray casting
//!
//! Walks the cells of a [`SpatialGrid`] along a finite segment using the
//! Amanatides & Woo voxel traversal ("A Fast Voxel Traversal Algorithm for Ray
//! Tracing", 1987) and tests the colliders bucketed in each visited cell.
//!
//! Cells are visited in increasing distance along the ray, and traversal stops
//! at the first cell that yields a hit; the closest hit among that cell's
//! colliders is returned. Colliders are bucketed by centre only, so a sphere
//! is found only when the ray passes through the cell holding its centre.
//!
//! The caster borrows the grid immutably. It sees the positions captured at the
//! last rebuild, and the borrow checker keeps rebuilds from interleaving with
//! a cast.

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::foundation::math::{try_cell_of, CellCoord, Vec3};
use crate::physics::collision::{ColliderId, Ray, RayHit};
use crate::spatial::SpatialGrid;

/// Maps colliders back to the objects that own them
pub trait OwnerLookup {
    /// Owner handle type
    type Owner: Copy + PartialEq;

    /// Owner of `collider`, or `None` if it is not registered
    fn owner_of(&self, collider: ColliderId) -> Option<Self::Owner>;
}

impl<O, S> OwnerLookup for HashMap<ColliderId, O, S>
where
    O: Copy + PartialEq,
    S: BuildHasher,
{
    type Owner = O;

    fn owner_of(&self, collider: ColliderId) -> Option<O> {
        self.get(&collider).copied()
    }
}

/// Per-axis traversal state
#[derive(Debug, Clone, Copy)]
struct AxisWalk {
    /// Current cell index on this axis
    cell: i32,
    /// -1, 0 or +1
    step: i32,
    /// Ray distance at which the next boundary on this axis is crossed
    t_max: f32,
    /// Ray distance needed to cross one whole cell on this axis
    t_delta: f32,
}

impl AxisWalk {
    fn new(cell: i32, origin: f32, direction: f32, cell_size: f32) -> Self {
        let step = if direction > 0.0 {
            1
        } else if direction < 0.0 {
            -1
        } else {
            0
        };

        if step == 0 {
            return Self {
                cell,
                step,
                t_max: f32::INFINITY,
                t_delta: f32::INFINITY,
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let next_boundary = (cell as f32 + f32::from(u8::from(step > 0))) * cell_size;
        Self {
            cell,
            step,
            t_max: (next_boundary - origin) / direction,
            t_delta: cell_size / direction.abs(),
        }
    }

    /// Move into the next cell on this axis, returning the distance at which
    /// the boundary was crossed
    fn advance(&mut self) -> f32 {
        let t = self.t_max;
        self.cell = self.cell.saturating_add(self.step);
        self.t_max += self.t_delta;
        t
    }
}

/// Upper bound on the cells a segment between two cells can visit
///
/// Every step moves one axis one cell towards `finish`; the slack absorbs
/// rounding at the final boundary.
fn cells_spanned(start: CellCoord, finish: CellCoord) -> u64 {
    let span = |a: i32, b: i32| (i64::from(b) - i64::from(a)).unsigned_abs();
    span(start.0, finish.0) + span(start.1, finish.1) + span(start.2, finish.2) + 4
}

/// Ray caster over the current contents of a spatial grid
#[derive(Debug, Clone, Copy)]
pub struct RayCaster<'a> {
    grid: &'a SpatialGrid,
}

impl<'a> RayCaster<'a> {
    /// Create a caster reading from `grid`
    pub fn new(grid: &'a SpatialGrid) -> Self {
        Self { grid }
    }

    /// First collider hit on the segment `origin -> end`, skipping colliders
    /// owned by `ignore`
    ///
    /// Returns `None` when nothing is hit or when `origin == end`.
    ///
    /// # Panics
    ///
    /// Panics if a collider in a visited cell has no owner in `owners`.
    pub fn cast<L: OwnerLookup>(
        &self,
        origin: Vec3,
        end: Vec3,
        ignore: Option<L::Owner>,
        owners: &L,
    ) -> Option<RayHit<L::Owner>> {
        self.cast_filtered(origin, end, owners, |owner| Some(owner) != ignore)
    }

    /// First collider hit on the segment `origin -> end` whose owner passes
    /// `accept`
    ///
    /// # Panics
    ///
    /// Panics if a collider in a visited cell has no owner in `owners`.
    pub fn cast_filtered<L, F>(
        &self,
        origin: Vec3,
        end: Vec3,
        owners: &L,
        accept: F,
    ) -> Option<RayHit<L::Owner>>
    where
        L: OwnerLookup,
        F: Fn(L::Owner) -> bool,
    {
        let Some(ray) = Ray::segment(origin, end) else {
            log::trace!("Ray cast skipped: zero-length segment at {origin:?}");
            return None;
        };

        let cell_size = self.grid.cell_size();
        let (Some(start), Some(finish)) = (try_cell_of(&ray.origin, cell_size), try_cell_of(&end, cell_size)) else {
            log::trace!("Ray cast skipped: segment {origin:?} -> {end:?} leaves the grid's index range");
            return None;
        };
        let max_cells = cells_spanned(start, finish);
        let (cx, cy, cz) = start;
        let mut x = AxisWalk::new(cx, ray.origin.x, ray.direction.x, cell_size);
        let mut y = AxisWalk::new(cy, ray.origin.y, ray.direction.y, cell_size);
        let mut z = AxisWalk::new(cz, ray.origin.z, ray.direction.z, cell_size);

        let mut t = 0.0_f32;
        let mut cells_visited = 0_u64;
        let mut hit: Option<RayHit<L::Owner>> = None;

        while t <= ray.length && cells_visited < max_cells {
            cells_visited += 1;

            if let Some(bucket) = self.grid.cell((x.cell, y.cell, z.cell)) {
                for collider in bucket {
                    let sphere = collider.sphere();
                    let Some(distance) = sphere.intersect_segment(&ray) else {
                        continue;
                    };
                    if hit.as_ref().is_some_and(|best| best.distance <= distance) {
                        continue;
                    }

                    let owner = owners.owner_of(collider.id).unwrap_or_else(|| {
                        panic!("{} is in the grid but has no registered owner", collider.id)
                    });
                    if !accept(owner) {
                        continue;
                    }

                    let point = ray.point_at(distance);
                    hit = Some(RayHit {
                        owner,
                        collider: collider.id,
                        point,
                        normal: sphere.normal_at(point, ray.direction),
                        distance,
                    });
                }

                if hit.is_some() {
                    break;
                }
            }

            // Step the axis whose boundary is nearest; ties go to x, then y, then z
            t = if x.t_max <= y.t_max && x.t_max <= z.t_max {
                x.advance()
            } else if y.t_max <= z.t_max {
                y.advance()
            } else {
                z.advance()
            };
        }

        log::trace!(
            "Ray cast from {:?} over {:.2} units visited {} cells: {}",
            ray.origin,
            ray.length,
            cells_visited,
            hit.as_ref()
                .map_or_else(|| "no hit".to_string(), |h| format!("{} at {:.3}", h.collider, h.distance))
        );
        hit
    }
}
