//! Best-fit (minimum waste) strategy.
//!
//! Each step opens the container whose best-effort fill leaves the least
//! wasted volume. Near-ties fall back to shape compatibility with the
//! largest placed item, then to the squatter, more stable container.

use std::cmp::Ordering;

use cartonize_core::geom::EPSILON;
use cartonize_core::{AllocationResult, Container, Item, PackedContainer, Placement, Result};

use super::fill_loop;
use crate::placer::Placer;

pub(crate) fn allocate(
    placer: &Placer,
    items: &[Item],
    catalog: &[&Container],
) -> Result<AllocationResult> {
    fill_loop(items, |remaining| {
        let mut best: Option<(Candidate, PackedContainer)> = None;
        for &container in catalog {
            let (packed, _) = placer.place_best_effort(remaining, container);
            if packed.is_empty() {
                continue;
            }
            let candidate = Candidate {
                waste: 1.0 - packed.utilization(),
                shape: shape_snugness(&packed),
                stability: squatness(container),
            };
            let better = match &best {
                None => true,
                Some((current, _)) => candidate.beats(current),
            };
            if better {
                best = Some((candidate, packed));
            }
        }
        best.map(|(_, packed)| packed)
    })
    .map(|result| result.with_strategy("best_fit"))
}

struct Candidate {
    waste: f64,
    shape: f64,
    stability: f64,
}

impl Candidate {
    /// Lower waste wins; within tolerance, higher shape snugness, then
    /// higher stability.
    fn beats(&self, other: &Candidate) -> bool {
        match compare_with_tolerance(self.waste, other.waste) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => match compare_with_tolerance(self.shape, other.shape) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => self.stability > other.stability + EPSILON,
            },
        }
    }
}

fn compare_with_tolerance(a: f64, b: f64) -> Ordering {
    if a < b - EPSILON {
        Ordering::Less
    } else if a > b + EPSILON {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Largest placed item volume over container volume.
fn shape_snugness(packed: &PackedContainer) -> f64 {
    let largest = packed
        .placements()
        .iter()
        .map(Placement::volume)
        .fold(0.0, f64::max);
    let capacity = packed.container().volume();
    if capacity > 0.0 {
        (largest / capacity).min(1.0)
    } else {
        0.0
    }
}

/// Base-to-height proportion, capped at 1; squat containers tip less.
fn squatness(container: &Container) -> f64 {
    let inner = container.inner_dimensions();
    if inner.z > 0.0 {
        (inner.x.min(inner.y) / inner.z).min(1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_fit_minimizes_waste() {
        let placer = Placer::default();
        let loose = Container::new("loose", 300.0, 300.0, 300.0).with_price(1.0);
        let tight = Container::new("tight", 110.0, 110.0, 110.0).with_price(1.0);
        let catalog = [&loose, &tight];
        let items = [Item::new("cube", 100.0, 100.0, 100.0)];

        let result = allocate(&placer, &items, &catalog).unwrap();
        assert_eq!(result.container_count(), 1);
        assert_eq!(result.containers()[0].container().id(), "tight");
    }

    #[test]
    fn test_waste_tie_breaks_on_stability() {
        let placer = Placer::default();
        // Equal volume, equal waste, equal shape score for one cube; the
        // squat container beats the tower.
        let tower = Container::new("tower", 100.0, 100.0, 800.0);
        let squat = Container::new("squat", 400.0, 200.0, 100.0);
        let catalog = [&tower, &squat];
        let items = [Item::new("cube", 100.0, 100.0, 100.0)];

        let result = allocate(&placer, &items, &catalog).unwrap();
        assert_eq!(result.containers()[0].container().id(), "squat");
    }

    #[test]
    fn test_best_fit_packs_everything_or_fails() {
        let placer = Placer::default();
        let tiny = Container::new("tiny", 50.0, 50.0, 50.0);
        let catalog = [&tiny];
        let items = [
            Item::new("fits", 40.0, 40.0, 40.0),
            Item::new("never", 60.0, 60.0, 60.0),
        ];
        assert!(allocate(&placer, &items, &catalog).is_err());
    }
}
