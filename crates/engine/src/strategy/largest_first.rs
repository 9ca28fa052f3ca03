//! Largest-container-first strategy.
//!
//! Visits the catalog from the largest container down and opens, at each
//! step, the one with the best items-per-cost fill of the remaining order.
//! Works well when a few big boxes can swallow most of an order.

use std::cmp::Ordering;

use cartonize_core::{AllocationResult, Container, Item, PackedContainer, Result};

use super::fill_loop;
use crate::placer::Placer;

pub(crate) fn allocate(
    placer: &Placer,
    items: &[Item],
    catalog: &[&Container],
) -> Result<AllocationResult> {
    let mut by_volume: Vec<&Container> = catalog.to_vec();
    by_volume.sort_by(|a, b| {
        b.volume()
            .partial_cmp(&a.volume())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id().cmp(b.id()))
    });

    fill_loop(items, |remaining| {
        let mut best: Option<(f64, PackedContainer)> = None;
        for &container in &by_volume {
            let (packed, _) = placer.place_best_effort(remaining, container);
            if packed.is_empty() {
                continue;
            }
            let efficiency = fill_efficiency(&packed);
            if best.as_ref().map_or(true, |(b, _)| efficiency > *b) {
                best = Some((efficiency, packed));
            }
        }
        best.map(|(_, packed)| packed)
    })
    .map(|result| result.with_strategy("largest_first"))
}

/// Items absorbed per unit of container cost; free containers count as
/// unit cost.
fn fill_efficiency(packed: &PackedContainer) -> f64 {
    let price = packed.container().price();
    let cost = if price > 0.0 { price } else { 1.0 };
    packed.item_count() as f64 / cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_orders_land_in_the_big_box() {
        let placer = Placer::default();
        let small = Container::new("small", 120.0, 120.0, 120.0).with_price(1.0);
        let big = Container::new("big", 400.0, 400.0, 200.0).with_price(2.0);
        let catalog = [&small, &big];
        // 16 cubes fill the big box's floor exactly.
        let items: Vec<Item> = (0..16)
            .map(|i| Item::new(format!("i{}", i), 100.0, 100.0, 100.0))
            .collect();

        let result = allocate(&placer, &items, &catalog).unwrap();
        // Big box absorbs 16 items for price 2 (8 per cost unit); the
        // small box manages 1 per cost unit.
        assert_eq!(result.container_count(), 1);
        assert_eq!(result.containers()[0].container().id(), "big");
        assert_eq!(result.item_count(), 16);
    }

    #[test]
    fn test_volume_ties_visit_ids_in_order() {
        let placer = Placer::default();
        // Identical containers; the fill and efficiency tie, so the first
        // one visited (lexicographically smaller id) is kept.
        let b_box = Container::new("beta", 150.0, 150.0, 150.0).with_price(1.0);
        let a_box = Container::new("alpha", 150.0, 150.0, 150.0).with_price(1.0);
        let catalog = [&b_box, &a_box];
        let items = [Item::new("cube", 100.0, 100.0, 100.0)];

        let result = allocate(&placer, &items, &catalog).unwrap();
        assert_eq!(result.containers()[0].container().id(), "alpha");
    }

    #[test]
    fn test_spills_into_additional_boxes() {
        let placer = Placer::default();
        let only = Container::new("only", 200.0, 200.0, 100.0).with_price(1.0);
        let catalog = [&only];
        // Five cubes, four per box.
        let items: Vec<Item> = (0..5)
            .map(|i| Item::new(format!("i{}", i), 100.0, 100.0, 100.0))
            .collect();

        let result = allocate(&placer, &items, &catalog).unwrap();
        assert_eq!(result.container_count(), 2);
        assert_eq!(result.containers()[0].item_count(), 4);
        assert_eq!(result.containers()[1].item_count(), 1);
        assert_eq!(result.strategy(), Some("largest_first"));
    }
}
