//! Deterministic corner-point placement engine.
//!
//! Items are sorted by packing priority and placed one at a time at the
//! best-scoring free position. Candidate positions are the container
//! origin plus the corner points opened up by every placed box. When the
//! corner sweep leaves items behind, a voxel scan of the remaining free
//! space tries to slot them into enclosed gaps before giving up.

use std::cmp::Ordering;
use std::collections::HashSet;

use nalgebra::Vector3;

use cartonize_core::geom::{Aabb, Rotation, EPSILON};
use cartonize_core::scoring::{PlacementWeights, ScoringPolicy};
use cartonize_core::{Container, Item, PackedContainer, Placement};

use crate::gaps::FreeSpaceGrid;

/// Single-container placement engine.
///
/// The placer is deterministic: the same items against the same container
/// always produce the same placements.
#[derive(Debug, Clone)]
pub struct Placer {
    policy: ScoringPolicy,
    gap_pass: bool,
}

impl Default for Placer {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

impl Placer {
    /// Creates a placer with the given scoring policy.
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            gap_pass: true,
        }
    }

    /// Enables or disables the free-space gap recovery pass.
    pub fn with_gap_pass(mut self, enabled: bool) -> Self {
        self.gap_pass = enabled;
        self
    }

    /// Returns the scoring policy.
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Orders items by descending packing priority.
    ///
    /// Large, dense, compact items sort first. Fragile and hazardous items
    /// are penalized so they pack later and end up higher in the load.
    /// The sort is stable, so equal scores keep their input order.
    pub fn priority_order(&self, items: &[Item]) -> Vec<Item> {
        let weights = self.policy.priority;
        let max_volume = items.iter().map(Item::volume).fold(0.0, f64::max);
        let max_density = items.iter().map(Item::density).fold(0.0, f64::max);

        let mut scored: Vec<(f64, &Item)> = items
            .iter()
            .map(|item| {
                let volume = if max_volume > 0.0 {
                    item.volume() / max_volume
                } else {
                    0.0
                };
                let density = if max_density > 0.0 {
                    item.density() / max_density
                } else {
                    0.0
                };
                let aspect = item.aspect_ratio();
                let cubic = if aspect.is_finite() && aspect > 0.0 {
                    1.0 / aspect
                } else {
                    0.0
                };
                let care = if item.needs_care() { 1.0 } else { 0.0 };

                let score = weights.volume * volume + weights.density * density
                    + weights.cubic * cubic
                    - weights.care_penalty * care;
                (score, item)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, item)| item.clone()).collect()
    }

    /// Places all items into the container, or nothing.
    ///
    /// Returns `None` as soon as any item cannot be placed; a partial fill
    /// is never returned. An empty order yields an empty fill.
    pub fn place(&self, items: &[Item], container: &Container) -> Option<PackedContainer> {
        if !container.is_packable() {
            return None;
        }
        let (packed, unplaced) = self.place_all(items, container);
        if unplaced.is_empty() {
            Some(packed)
        } else {
            None
        }
    }

    /// Places as many items as fit, returning the ones left over.
    pub fn place_best_effort(
        &self,
        items: &[Item],
        container: &Container,
    ) -> (PackedContainer, Vec<Item>) {
        if !container.is_packable() {
            return (PackedContainer::new(container.clone()), items.to_vec());
        }
        self.place_all(items, container)
    }

    fn place_all(&self, items: &[Item], container: &Container) -> (PackedContainer, Vec<Item>) {
        let ordered = self.priority_order(items);
        let mut space = PlacementSpace::new(container, self.policy.placement);
        let mut packed = PackedContainer::new(container.clone());
        let mut unplaced = Vec::new();

        for item in ordered {
            match self.best_position(&space, &item) {
                Some((position, size, rotation)) => {
                    let occupied = Aabb::from_position_size(position, size);
                    space.push(occupied, item.weight());
                    packed.add(Placement::new(item.id(), position, size, rotation), item.weight());
                }
                None => unplaced.push(item),
            }
        }

        if !unplaced.is_empty() && self.gap_pass {
            unplaced = self.recover_gaps(&mut space, &mut packed, unplaced);
        }

        (packed, unplaced)
    }

    /// Finds the lowest-fitness valid position over all orientations and
    /// corner candidates.
    fn best_position(
        &self,
        space: &PlacementSpace,
        item: &Item,
    ) -> Option<(Vector3<f64>, Vector3<f64>, Rotation)> {
        let mut best: Option<(f64, Vector3<f64>, Vector3<f64>, Rotation)> = None;

        for (size, rotation) in Rotation::orientations(item.dimensions()) {
            if !space.size_fits(size) {
                continue;
            }
            for position in space.candidate_positions(size) {
                let candidate = Aabb::from_position_size(position, size);
                if !space.is_free(&candidate) {
                    continue;
                }
                let fitness = space.fitness(&candidate, item.weight());
                if best.as_ref().map_or(true, |(b, ..)| fitness < *b) {
                    best = Some((fitness, position, size, rotation));
                }
            }
        }

        best.map(|(_, position, size, rotation)| (position, size, rotation))
    }

    /// Retries unplaced items against the empty regions discovered by a
    /// voxel scan of the remaining free space.
    fn recover_gaps(
        &self,
        space: &mut PlacementSpace,
        packed: &mut PackedContainer,
        unplaced: Vec<Item>,
    ) -> Vec<Item> {
        let mut still_unplaced = Vec::new();

        for item in unplaced {
            let dims = item.dimensions();
            let finest = dims.x.min(dims.y).min(dims.z) / 2.0;
            let grid = FreeSpaceGrid::build(space.inner(), space.boxes(), finest);
            let regions = grid.empty_regions();

            let mut best: Option<(f64, Vector3<f64>, Vector3<f64>, Rotation)> = None;
            for (size, rotation) in Rotation::orientations(dims) {
                if !space.size_fits(size) {
                    continue;
                }
                for region in &regions {
                    let position = region.min;
                    let candidate = Aabb::from_position_size(position, size);
                    if !candidate.within_bounds(space.inner()) || !space.is_free(&candidate) {
                        continue;
                    }
                    let fitness = space.fitness(&candidate, item.weight());
                    if best.as_ref().map_or(true, |(b, ..)| fitness < *b) {
                        best = Some((fitness, position, size, rotation));
                    }
                }
            }

            match best {
                Some((_, position, size, rotation)) => {
                    log::debug!(
                        "gap recovery placed '{}' at ({:.1}, {:.1}, {:.1})",
                        item.id(),
                        position.x,
                        position.y,
                        position.z
                    );
                    let occupied = Aabb::from_position_size(position, size);
                    space.push(occupied, item.weight());
                    packed.add(Placement::new(item.id(), position, size, rotation), item.weight());
                }
                None => still_unplaced.push(item),
            }
        }

        still_unplaced
    }
}

/// Occupancy state of a container while it is being filled.
struct PlacementSpace {
    inner: Vector3<f64>,
    weights: PlacementWeights,
    boxes: Vec<Aabb>,
    total_weight: f64,
    moment_x: f64,
    moment_y: f64,
}

impl PlacementSpace {
    fn new(container: &Container, weights: PlacementWeights) -> Self {
        Self {
            inner: container.inner_dimensions(),
            weights,
            boxes: Vec::new(),
            total_weight: 0.0,
            moment_x: 0.0,
            moment_y: 0.0,
        }
    }

    fn inner(&self) -> Vector3<f64> {
        self.inner
    }

    fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    /// Checks whether an oriented size fits the container at all.
    fn size_fits(&self, size: Vector3<f64>) -> bool {
        size.x <= self.inner.x + EPSILON
            && size.y <= self.inner.y + EPSILON
            && size.z <= self.inner.z + EPSILON
    }

    /// Candidate minimum corners for a box of the given size.
    ///
    /// The container origin plus, for every placed box, the seven corner
    /// points that open up behind, beside and above it. Duplicates are
    /// dropped and positions that cannot hold the size are filtered out.
    /// The result is sorted bottom-up (z, then y, then x) so ties in
    /// fitness resolve toward the origin.
    fn candidate_positions(&self, size: Vector3<f64>) -> Vec<Vector3<f64>> {
        let mut candidates = vec![Vector3::new(0.0, 0.0, 0.0)];
        for b in &self.boxes {
            let (min, max) = (b.min, b.max);
            candidates.push(Vector3::new(max.x, min.y, min.z));
            candidates.push(Vector3::new(min.x, max.y, min.z));
            candidates.push(Vector3::new(min.x, min.y, max.z));
            candidates.push(Vector3::new(max.x, max.y, min.z));
            candidates.push(Vector3::new(max.x, min.y, max.z));
            candidates.push(Vector3::new(min.x, max.y, max.z));
            candidates.push(Vector3::new(max.x, max.y, max.z));
        }

        let mut seen = HashSet::new();
        candidates.retain(|p| {
            seen.insert((p.x.to_bits(), p.y.to_bits(), p.z.to_bits()))
                && p.x + size.x <= self.inner.x + EPSILON
                && p.y + size.y <= self.inner.y + EPSILON
                && p.z + size.z <= self.inner.z + EPSILON
        });

        candidates.sort_by(|a, b| {
            a.z.partial_cmp(&b.z)
                .unwrap_or(Ordering::Equal)
                .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
                .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        });

        candidates
    }

    /// Checks that a box does not collide with any placed box.
    fn is_free(&self, candidate: &Aabb) -> bool {
        !self.boxes.iter().any(|b| b.overlaps(candidate))
    }

    /// Scores a candidate box; lower is better.
    ///
    /// Combines corner pull, height penalty, ground and wall contact
    /// bonuses, and a center-of-mass balance penalty. The weights keep
    /// ground contact dominant over corner pull, and corner pull dominant
    /// over balance.
    fn fitness(&self, candidate: &Aabb, item_weight: f64) -> f64 {
        let w = &self.weights;

        let diagonal = self.inner.norm();
        let corner = if diagonal > 0.0 {
            candidate.min.norm() / diagonal
        } else {
            0.0
        };

        let height = if self.inner.z > 0.0 {
            candidate.min.z / self.inner.z
        } else {
            0.0
        };

        let ground = if candidate.min.z <= EPSILON { 1.0 } else { 0.0 };

        let mut walls = 0.0;
        if candidate.min.x <= EPSILON {
            walls += 1.0;
        }
        if candidate.min.y <= EPSILON {
            walls += 1.0;
        }
        if candidate.max.x >= self.inner.x - EPSILON {
            walls += 1.0;
        }
        if candidate.max.y >= self.inner.y - EPSILON {
            walls += 1.0;
        }
        let wall_contact = walls / 4.0;

        let balance = self.balance_offset(candidate, item_weight);

        w.corner * corner + w.height * height - w.ground_bonus * ground
            - w.wall_bonus * wall_contact
            + w.balance * balance
    }

    /// Normalized horizontal offset of the load's center of mass from the
    /// container's center, were the candidate box added.
    fn balance_offset(&self, candidate: &Aabb, item_weight: f64) -> f64 {
        let mass = item_weight.max(0.0);
        let total = self.total_weight + mass;
        if total <= EPSILON {
            return 0.0;
        }

        let center = candidate.center();
        let load_x = (self.moment_x + mass * center.x) / total;
        let load_y = (self.moment_y + mass * center.y) / total;
        let dx = load_x - self.inner.x / 2.0;
        let dy = load_y - self.inner.y / 2.0;

        let half_diagonal = (self.inner.x * self.inner.x + self.inner.y * self.inner.y).sqrt() / 2.0;
        if half_diagonal > 0.0 {
            ((dx * dx + dy * dy).sqrt() / half_diagonal).min(1.0)
        } else {
            0.0
        }
    }

    fn push(&mut self, occupied: Aabb, item_weight: f64) {
        let mass = item_weight.max(0.0);
        let center = occupied.center();
        self.total_weight += mass;
        self.moment_x += mass * center.x;
        self.moment_y += mass * center.y;
        self.boxes.push(occupied);
    }
}
