//! Packing strategies.
//!
//! Every strategy consumes the whole order or fails: the shared fill loop
//! repeatedly picks a container, packs what it can of the remaining items
//! into it, and stops only when the order is exhausted or no container
//! absorbs anything. The strategies differ purely in how they score the
//! per-step container choice.

pub(crate) mod best_fit;
pub(crate) mod ensemble;
pub(crate) mod greedy;
pub(crate) mod intelligent;
pub(crate) mod largest_first;

use cartonize_core::geom::{Rotation, EPSILON};
use cartonize_core::{AllocationResult, Container, Error, Item, PackedContainer, Result};

/// Runs the open-a-container loop until the order is exhausted.
///
/// `choose_step` gets the remaining items and returns the packed container
/// to open next. A `None` or an empty fill means no progress is possible
/// and the whole allocation fails.
pub(crate) fn fill_loop<F>(items: &[Item], mut choose_step: F) -> Result<AllocationResult>
where
    F: FnMut(&[Item]) -> Option<PackedContainer>,
{
    let mut remaining = items.to_vec();
    let mut result = AllocationResult::new();

    while !remaining.is_empty() {
        let packed = match choose_step(&remaining) {
            Some(packed) if !packed.is_empty() => packed,
            _ => {
                return Err(Error::AllocationExhausted {
                    unplaced: remaining.len(),
                })
            }
        };
        remove_placed(&mut remaining, &packed);
        result.push(packed);
    }

    Ok(result)
}

/// Removes the first remaining item matching each placement.
///
/// Duplicate IDs are consumed one placement at a time.
pub(crate) fn remove_placed(remaining: &mut Vec<Item>, packed: &PackedContainer) {
    for placement in packed.placements() {
        if let Some(index) = remaining
            .iter()
            .position(|item| item.id() == placement.item_id)
        {
            remaining.remove(index);
        }
    }
}

/// Cheapest positive price in the catalog, if any.
pub(crate) fn cheapest_positive_price(catalog: &[&Container]) -> Option<f64> {
    catalog
        .iter()
        .map(|c| c.price())
        .filter(|p| *p > 0.0)
        .fold(None, |min, p| match min {
            Some(m) => Some(if p < m { p } else { m }),
            None => Some(p),
        })
}

/// Relative cost score: the cheapest container scores 1, pricier ones
/// proportionally less. Free containers always score 1.
pub(crate) fn cost_score(price: f64, cheapest: Option<f64>) -> f64 {
    if price <= 0.0 {
        return 1.0;
    }
    cheapest.map_or(1.0, |base| (base / price).min(1.0))
}

/// Fraction of the container payload consumed by a fill.
pub(crate) fn payload_usage(packed: &PackedContainer) -> f64 {
    let payload = packed.container().max_weight();
    if payload > 0.0 {
        (packed.total_item_weight() / payload).min(1.0)
    } else {
        0.0
    }
}

/// Whether some orientation of the item fits the container interior.
pub(crate) fn item_fits(item: &Item, container: &Container) -> bool {
    let inner = container.inner_dimensions();
    Rotation::orientations(item.dimensions())
        .iter()
        .any(|(size, _)| {
            size.x <= inner.x + EPSILON
                && size.y <= inner.y + EPSILON
                && size.z <= inner.z + EPSILON
        })
}
