//! Intelligent single-or-multi container strategy.
//!
//! First tries to put the whole order into one container, visiting the
//! catalog cheapest-first and skipping containers the largest item cannot
//! even enter. When no single container holds the order, falls back to a
//! multi-container fill scored on utilization, size appropriateness,
//! item efficiency and shape compatibility.

use std::cmp::Ordering;

use cartonize_core::scoring::SelectionWeights;
use cartonize_core::{AllocationResult, Container, Item, PackedContainer, Result};

use super::{fill_loop, item_fits};
use crate::placer::Placer;

pub(crate) fn allocate(
    placer: &Placer,
    items: &[Item],
    catalog: &[&Container],
) -> Result<AllocationResult> {
    if let Some(single) = single_container_attempt(placer, items, catalog) {
        let mut result = AllocationResult::new().with_strategy("intelligent");
        result.push(single);
        return Ok(result);
    }

    log::debug!("order does not fit one container, switching to multi-container fill");
    let weights = placer.policy().selection;

    fill_loop(items, |remaining| {
        let mut best: Option<(f64, PackedContainer)> = None;
        let demand_volume: f64 = remaining.iter().map(Item::volume).sum();
        let largest_volume = remaining.iter().map(Item::volume).fold(0.0, f64::max);

        for &container in catalog {
            let (packed, _) = placer.place_best_effort(remaining, container);
            if packed.is_empty() {
                continue;
            }
            let score = selection_score(&packed, remaining.len(), demand_volume, largest_volume, &weights);
            if best.as_ref().map_or(true, |(b, _)| score > *b) {
                best = Some((score, packed));
            }
        }
        best.map(|(_, packed)| packed)
    })
    .map(|result| result.with_strategy("intelligent"))
}

/// Tries the whole order in one container, cheapest catalog entries first.
fn single_container_attempt(
    placer: &Placer,
    items: &[Item],
    catalog: &[&Container],
) -> Option<PackedContainer> {
    let largest = items.iter().fold(None::<&Item>, |best, item| match best {
        Some(current) if current.volume() >= item.volume() => Some(current),
        _ => Some(item),
    })?;

    let mut by_price: Vec<&Container> = catalog.to_vec();
    by_price.sort_by(|a, b| {
        a.price()
            .partial_cmp(&b.price())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id().cmp(b.id()))
    });

    for &container in &by_price {
        if !item_fits(largest, container) {
            continue;
        }
        if let Some(packed) = placer.place(items, container) {
            return Some(packed);
        }
    }

    None
}

fn selection_score(
    packed: &PackedContainer,
    remaining: usize,
    demand_volume: f64,
    largest_volume: f64,
    weights: &SelectionWeights,
) -> f64 {
    let utilization = packed.utilization();
    let size_fit = size_appropriateness(packed.container().volume(), demand_volume);
    let item_efficiency = packed.item_count() as f64 / remaining.max(1) as f64;
    let capacity = packed.container().volume();
    let shape = if capacity > 0.0 {
        (largest_volume / capacity).min(1.0)
    } else {
        0.0
    };

    weights.utilization * utilization
        + weights.size_fit * size_fit
        + weights.item_efficiency * item_efficiency
        + weights.shape * shape
}

/// How well a container volume suits the remaining demand.
///
/// Zero below the demand volume, rising to 1 at one-and-a-half times the
/// demand, then falling off for oversized containers.
fn size_appropriateness(container_volume: f64, demand_volume: f64) -> f64 {
    if demand_volume <= 0.0 {
        return 0.0;
    }
    let ratio = container_volume / demand_volume;
    if ratio < 1.0 {
        0.0
    } else if ratio <= 1.5 {
        (ratio - 1.0) / 0.5
    } else {
        1.5 / ratio
    }
}
