//! Greedy max-utilization strategy.
//!
//! Each step opens the container where a best-effort fill of the remaining
//! items scores highest on a blend of volume utilization, payload usage,
//! absorbed item share and container cost.

use cartonize_core::scoring::ContainerWeights;
use cartonize_core::{AllocationResult, Container, Item, PackedContainer, Result};

use super::{cheapest_positive_price, cost_score, fill_loop, payload_usage};
use crate::placer::Placer;

pub(crate) fn allocate(
    placer: &Placer,
    items: &[Item],
    catalog: &[&Container],
) -> Result<AllocationResult> {
    let weights = placer.policy().container;
    let cheapest = cheapest_positive_price(catalog);

    fill_loop(items, |remaining| {
        let mut best: Option<(f64, PackedContainer)> = None;
        for &container in catalog {
            let (packed, _) = placer.place_best_effort(remaining, container);
            if packed.is_empty() {
                continue;
            }
            let score = step_score(&packed, remaining.len(), cheapest, &weights);
            if best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, packed));
            }
        }
        best.map(|(_, packed)| packed)
    })
    .map(|result| result.with_strategy("greedy"))
}

fn step_score(
    packed: &PackedContainer,
    remaining: usize,
    cheapest: Option<f64>,
    weights: &ContainerWeights,
) -> f64 {
    let utilization = packed.utilization();
    let payload = payload_usage(packed);
    let item_ratio = packed.item_count() as f64 / remaining.max(1) as f64;
    let cost = cost_score(packed.container().price(), cheapest);

    weights.utilization * utilization
        + weights.density * payload
        + weights.item_ratio * item_ratio
        + weights.cost * cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_prefers_the_fuller_container() {
        let placer = Placer::default();
        // Four cubes fill the snug container completely; the roomy one
        // would sit one quarter empty.
        let snug = Container::new("snug", 200.0, 200.0, 100.0).with_price(1.0);
        let roomy = Container::new("roomy", 200.0, 200.0, 200.0).with_price(1.0);
        let catalog = [&snug, &roomy];
        let items: Vec<Item> = (0..4)
            .map(|i| Item::new(format!("i{}", i), 100.0, 100.0, 100.0))
            .collect();

        let result = allocate(&placer, &items, &catalog).unwrap();
        assert_eq!(result.container_count(), 1);
        assert_eq!(result.containers()[0].container().id(), "snug");
        assert_eq!(result.item_count(), 4);
    }

    #[test]
    fn test_greedy_splits_over_multiple_containers() {
        let placer = Placer::default();
        let medium = Container::new("medium", 100.0, 100.0, 220.0).with_price(1.0);
        let catalog = [&medium];
        let items: Vec<Item> = (0..6)
            .map(|i| Item::new(format!("i{}", i), 100.0, 100.0, 100.0))
            .collect();

        let result = allocate(&placer, &items, &catalog).unwrap();
        // Two cubes per container.
        assert_eq!(result.container_count(), 3);
        assert_eq!(result.item_count(), 6);
        assert_eq!(result.strategy(), Some("greedy"));
    }

    #[test]
    fn test_greedy_fails_when_nothing_fits() {
        let placer = Placer::default();
        let small = Container::new("small", 50.0, 50.0, 50.0);
        let catalog = [&small];
        let items = [Item::new("big", 100.0, 100.0, 100.0)];

        assert!(allocate(&placer, &items, &catalog).is_err());
    }
}
