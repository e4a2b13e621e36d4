//! Uniform spatial hash grid for broad-phase collision detection
//!
//! Space is cut into cubes of edge `cell_size`. Each collider lands in the
//! single cell containing its centre, `floor(p / cell_size)` per axis. A
//! neighbour query unions the 27 cells around a collider's cell.
//!
//! The grid has no per-object removal. It is rebuilt every frame instead:
//! `clear()` then `add()` for every live collider. Cells are created lazily
//! and dropped wholesale on `clear()`.

use std::collections::{HashMap, HashSet};

use crate::core::config::{CollisionConfig, DEFAULT_CELL_SIZE};
use crate::foundation::math::{cell_of, CellCoord, Vec3};
use crate::physics::collision::{Collider, ColliderId};
use crate::physics::error::CollisionError;

/// Uniform hash grid bucketing collider snapshots by cell
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellCoord, Vec<Collider>>,
    collider_count: usize,
}

impl SpatialGrid {
    /// Create an empty grid. `cell_size` is fixed for the grid's lifetime.
    pub fn new(cell_size: f32) -> Result<Self, CollisionError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(CollisionError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cells: HashMap::new(),
            collider_count: 0,
        })
    }

    /// Create an empty grid from configuration
    pub fn from_config(config: &CollisionConfig) -> Result<Self, CollisionError> {
        Self::new(config.cell_size)
    }

    /// Edge length of one cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing a world position
    pub fn cell_of(&self, position: &Vec3) -> CellCoord {
        cell_of(position, self.cell_size)
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.clear();
        self.collider_count = 0;
    }

    /// Insert a collider into the cell containing its position
    ///
    /// Each cell behaves as a set keyed by [`ColliderId`]: adding the same id
    /// to the same cell again replaces the stored snapshot instead of adding a
    /// second entry.
    pub fn add(&mut self, collider: Collider) {
        let key = self.cell_of(&collider.position);
        let bucket = self.cells.entry(key).or_default();

        if let Some(existing) = bucket.iter_mut().find(|c| c.id == collider.id) {
            *existing = collider;
        } else {
            bucket.push(collider);
            self.collider_count += 1;
        }
    }

    /// All colliders in the 3×3×3 block of cells around `collider`'s cell
    ///
    /// The result is deduplicated by id and includes `collider` itself when it
    /// was added; callers filter self-matches. Order is deterministic for a
    /// given grid state: cells are visited by offset `(dx, dy, dz)` from
    /// `-1` to `1`, and insertion order is kept within each cell.
    pub fn query_nearby(&self, collider: &Collider) -> Vec<Collider> {
        self.query_cell_neighborhood(self.cell_of(&collider.position))
    }

    /// All colliders in the 3×3×3 block of cells around `center`
    pub fn query_cell_neighborhood(&self, center: CellCoord) -> Vec<Collider> {
        let (cx, cy, cz) = center;
        let mut seen: HashSet<ColliderId> = HashSet::new();
        let mut neighbors = Vec::new();

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        neighbors.extend(bucket.iter().filter(|c| seen.insert(c.id)).copied());
                    }
                }
            }
        }

        neighbors
    }

    /// Colliders stored in one cell, if that cell is populated
    pub fn cell(&self, coord: CellCoord) -> Option<&[Collider]> {
        self.cells.get(&coord).map(Vec::as_slice)
    }

    /// Number of colliders stored since the last clear
    pub fn len(&self) -> usize {
        self.collider_count
    }

    /// True when nothing has been added since the last clear
    pub fn is_empty(&self) -> bool {
        self.collider_count == 0
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            cells: HashMap::new(),
            collider_count: 0,
        }
    }
}
