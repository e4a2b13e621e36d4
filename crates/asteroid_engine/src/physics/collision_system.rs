//! Per-frame collision resolution
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13:
//! "The collision detection system is typically split into two phases:
//! broad-phase and narrow-phase."
//!
//! Broad phase is the [`SpatialGrid`] 3×3×3 neighbourhood query; narrow phase
//! is a squared-distance sphere test. The resolver does not know about actors:
//! the caller hands it `(owner, Option<Collider>)` pairs and a callback, and
//! the resolver reports each overlapping pair to both owners once per frame.
//!
//! Overlap is reported every frame the spheres overlap (continuous, not
//! edge-triggered); nothing is remembered between frames.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::physics::collision::{Collider, ColliderId};
use crate::spatial::SpatialGrid;

/// Two distinct owners whose colliders overlapped this frame
///
/// `a` is the owner inserted into the grid first, which makes the pair
/// canonical regardless of which side's neighbour query surfaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair<O> {
    /// Owner with the lower insertion index
    pub a: O,
    /// Owner with the higher insertion index
    pub b: O,
}

impl<O: PartialEq> CollisionPair<O> {
    /// Whether `owner` is one side of this pair
    pub fn involves(&self, owner: &O) -> bool {
        self.a == *owner || self.b == *owner
    }
}

/// Counters from the most recent [`CollisionResolver::resolve_frame`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Colliders inserted into the grid
    pub colliders: usize,
    /// Populated grid cells after the rebuild
    pub cells: usize,
    /// Distinct pairs that reached the narrow phase
    pub candidate_tests: usize,
    /// Pairs whose spheres overlapped
    pub overlaps: usize,
}

/// Broad + narrow phase loop, run once per frame
#[derive(Debug, Default)]
pub struct CollisionResolver {
    seen: HashSet<(usize, usize)>,
    last_stats: ResolverStats,
}

impl CollisionResolver {
    /// Create a resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild `grid` from `objects` and report every overlapping pair
    ///
    /// Objects without a collider are skipped entirely. For each overlap
    /// `on_overlap(a, b)` is called, then `on_overlap(b, a)`, so both owners
    /// are notified exactly once per frame. The overlapping pairs are also
    /// returned in discovery order.
    ///
    /// # Panics
    ///
    /// Panics if the grid yields a collider that none of `objects` owns. That
    /// can only happen if two owners share a [`ColliderId`] or the grid is
    /// mutated concurrently, both of which are bookkeeping bugs in the caller.
    pub fn resolve_frame<O, I, F>(
        &mut self,
        grid: &mut SpatialGrid,
        objects: I,
        mut on_overlap: F,
    ) -> Vec<CollisionPair<O>>
    where
        O: Copy + Eq + Hash,
        I: IntoIterator<Item = (O, Option<Collider>)>,
        F: FnMut(O, O),
    {
        // Rebuild: only objects with a collider participate
        let entries: Vec<(O, Collider)> = objects
            .into_iter()
            .filter_map(|(owner, collider)| collider.map(|c| (owner, c)))
            .collect();

        grid.clear();
        for (_, collider) in &entries {
            grid.add(*collider);
        }

        // Reverse lookup for this pass only: collider -> (insertion index, owner)
        let owners: HashMap<ColliderId, (usize, O)> = entries
            .iter()
            .enumerate()
            .map(|(index, (owner, collider))| (collider.id, (index, *owner)))
            .collect();

        self.seen.clear();
        let mut stats = ResolverStats {
            colliders: grid.len(),
            cells: grid.cell_count(),
            ..ResolverStats::default()
        };
        let mut pairs = Vec::new();

        for (index_a, (owner_a, collider_a)) in entries.iter().enumerate() {
            for collider_b in grid.query_nearby(collider_a) {
                if collider_b.id == collider_a.id {
                    continue;
                }

                let &(index_b, owner_b) = owners
                    .get(&collider_b.id)
                    .unwrap_or_else(|| panic!("{} is in the grid but has no owner", collider_b.id));

                let key = (index_a.min(index_b), index_a.max(index_b));
                if !self.seen.insert(key) {
                    continue;
                }
                stats.candidate_tests += 1;

                if collider_a.overlaps(&collider_b) {
                    on_overlap(*owner_a, owner_b);
                    on_overlap(owner_b, *owner_a);

                    let (a, b) = if index_a < index_b {
                        (*owner_a, owner_b)
                    } else {
                        (owner_b, *owner_a)
                    };
                    pairs.push(CollisionPair { a, b });
                }
            }
        }

        stats.overlaps = pairs.len();
        log::debug!(
            "Collision pass: {} colliders in {} cells, {} candidate pairs, {} overlaps",
            stats.colliders,
            stats.cells,
            stats.candidate_tests,
            stats.overlaps
        );
        self.last_stats = stats;
        pairs
    }

    /// Counters from the most recent pass
    pub fn last_stats(&self) -> ResolverStats {
        self.last_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn object(owner: u32, x: f32, y: f32, z: f32, radius: f32) -> (u32, Option<Collider>) {
        let collider = Collider::new(ColliderId::new(owner), Vec3::new(x, y, z), radius).unwrap();
        (owner, Some(collider))
    }

    fn run(objects: Vec<(u32, Option<Collider>)>) -> (Vec<CollisionPair<u32>>, Vec<(u32, u32)>) {
        let mut grid = SpatialGrid::new(20.0).unwrap();
        let mut resolver = CollisionResolver::new();
        let mut calls = Vec::new();
        let pairs = resolver.resolve_frame(&mut grid, objects, |a, b| calls.push((a, b)));
        (pairs, calls)
    }

    #[test]
    fn test_overlapping_spheres_reported() {
        let (pairs, calls) = run(vec![object(1, 0.0, 0.0, 0.0, 1.0), object(2, 1.5, 0.0, 0.0, 1.0)]);

        assert_eq!(pairs, vec![CollisionPair { a: 1, b: 2 }]);
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&(1, 2)));
        assert!(calls.contains(&(2, 1)));
    }

    #[test]
    fn test_separated_spheres_not_reported() {
        let (pairs, calls) = run(vec![object(1, 0.0, 0.0, 0.0, 1.0), object(2, 3.0, 0.0, 0.0, 1.0)]);

        assert!(pairs.is_empty());
        assert!(calls.is_empty());
    }

    #[test]
    fn test_touching_spheres_not_reported() {
        let (pairs, _) = run(vec![object(1, 0.0, 0.0, 0.0, 1.0), object(2, 2.0, 0.0, 0.0, 1.0)]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_objects_without_collider_are_skipped() {
        let (pairs, calls) = run(vec![
            object(1, 0.0, 0.0, 0.0, 1.0),
            (2, None),
            object(3, 0.5, 0.0, 0.0, 1.0),
        ]);

        assert_eq!(pairs, vec![CollisionPair { a: 1, b: 3 }]);
        assert!(calls.iter().all(|&(a, b)| a != 2 && b != 2));
    }

    #[test]
    fn test_each_pair_notified_once_per_direction() {
        // A tight cluster: every pair overlaps and every pair is surfaced by
        // both sides' neighbour queries.
        let objects: Vec<_> = (0..6)
            .map(|i| object(i, i as f32 * 0.1, 0.0, 0.0, 1.0))
            .collect();
        let (pairs, calls) = run(objects);

        assert_eq!(pairs.len(), 15);
        assert_eq!(calls.len(), 30);
        for a in 0..6 {
            for b in 0..6 {
                let count = calls.iter().filter(|&&c| c == (a, b)).count();
                assert_eq!(count, usize::from(a != b), "pair ({a}, {b})");
            }
        }
    }

    #[test]
    fn test_overlap_across_cell_boundary() {
        // Straddling the x = 20 plane: different cells, still neighbours
        let (pairs, _) = run(vec![object(1, 19.5, 0.0, 0.0, 1.0), object(2, 20.5, 0.0, 0.0, 1.0)]);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut objects = Vec::new();
        for i in 0..60_u32 {
            let f = i as f32;
            let x = (f * 7.31).sin() * 40.0;
            let y = (f * 3.17).cos() * 40.0;
            let z = (f * 1.91).sin() * 40.0;
            let radius = 1.0 + (f * 0.37).sin().abs() * 4.0;
            objects.push(object(i, x, y, z, radius));
        }

        let mut expected = HashSet::new();
        for (i, (owner_a, a)) in objects.iter().enumerate() {
            for (owner_b, b) in &objects[i + 1..] {
                if a.unwrap().overlaps(&b.unwrap()) {
                    expected.insert((*owner_a, *owner_b));
                }
            }
        }

        let (pairs, _) = run(objects);
        let found: HashSet<(u32, u32)> = pairs.iter().map(|p| (p.a, p.b)).collect();
        assert_eq!(found.len(), pairs.len(), "no pair reported twice");
        assert_eq!(found, expected);
    }

    #[test]
    fn test_no_memory_between_frames() {
        let mut grid = SpatialGrid::new(20.0).unwrap();
        let mut resolver = CollisionResolver::new();
        let objects = vec![object(1, 0.0, 0.0, 0.0, 1.0), object(2, 1.0, 0.0, 0.0, 1.0)];

        for _ in 0..3 {
            let mut calls = 0;
            let pairs = resolver.resolve_frame(&mut grid, objects.clone(), |_, _| calls += 1);
            assert_eq!(pairs.len(), 1);
            assert_eq!(calls, 2);
        }
        assert_eq!(resolver.last_stats().overlaps, 1);
        assert_eq!(resolver.last_stats().colliders, 2);
    }

    #[test]
    fn test_rebuild_replaces_previous_frame() {
        let mut grid = SpatialGrid::new(20.0).unwrap();
        let mut resolver = CollisionResolver::new();

        resolver.resolve_frame(&mut grid, vec![object(1, 0.0, 0.0, 0.0, 1.0)], |_, _| {});
        resolver.resolve_frame(&mut grid, vec![object(2, 100.0, 0.0, 0.0, 1.0)], |_, _| {});

        assert_eq!(grid.len(), 1);
        assert!(grid.cell((0, 0, 0)).is_none());
        assert!(grid.cell((5, 0, 0)).is_some());
    }
}
