//! Strategy recommendation for order profiles.
//!
//! The orchestrator can consult a [`StrategyAdvisor`] before picking a
//! packing strategy. Advisors are injected, deterministic and side-effect
//! free; a trained model can implement the trait without the engine
//! knowing. [`HeuristicAdvisor`] is the built-in rule-based fallback.

use std::collections::HashMap;

use cartonize_core::{Container, Item};

use crate::allocator::StrategyKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A confidence-weighted strategy recommendation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrategyAdvice {
    /// Recommended strategy.
    pub strategy: StrategyKind,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Features the recommendation was derived from.
    pub features: HashMap<String, f64>,
}

/// Pluggable source of strategy recommendations.
///
/// Implementations must be deterministic for a given order and catalog.
pub trait StrategyAdvisor {
    /// Recommends a strategy for the given order, or `None` when the
    /// advisor has nothing to say.
    fn advise(&self, items: &[Item], catalog: &[Container]) -> Option<StrategyAdvice>;
}

/// An advisor that never recommends anything.
///
/// Useful to pin the orchestrator to its size-based defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdvisor;

impl StrategyAdvisor for NullAdvisor {
    fn advise(&self, _items: &[Item], _catalog: &[Container]) -> Option<StrategyAdvice> {
        None
    }
}

/// Numeric profile of an order against a catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderFeatures {
    /// Number of items in the order.
    pub total_items: f64,
    /// Combined item volume in cubic millimeters.
    pub total_volume: f64,
    /// Combined item volume over the largest packable container volume.
    /// Values above 1 mean a single container cannot hold the order.
    pub utilization_potential: f64,
    /// Fraction of items flagged fragile.
    pub fragility_ratio: f64,
    /// Combined item weight over the largest container payload.
    pub weight_ratio: f64,
    /// Ratio of the largest to the smallest item volume.
    pub size_diversity: f64,
    /// Population variance of item aspect ratios.
    pub aspect_variance: f64,
    /// Spread of positive container prices relative to their mean.
    pub price_spread: f64,
}

impl OrderFeatures {
    /// Extracts features from an order against a catalog.
    ///
    /// Returns `None` when the order is empty or no packable container
    /// exists, since every feature would be degenerate.
    pub fn extract(items: &[Item], catalog: &[Container]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let packable: Vec<&Container> = catalog.iter().filter(|c| c.is_packable()).collect();
        if packable.is_empty() {
            return None;
        }

        let total_items = items.len() as f64;
        let total_volume: f64 = items.iter().map(Item::volume).sum();
        let total_weight: f64 = items.iter().map(Item::weight).sum();

        let max_container_volume = packable
            .iter()
            .map(|c| c.volume())
            .fold(0.0, f64::max);
        let utilization_potential = total_volume / max_container_volume;

        let fragile_count = items.iter().filter(|i| i.is_fragile()).count() as f64;
        let fragility_ratio = fragile_count / total_items;

        let max_payload = packable.iter().map(|c| c.max_weight()).fold(0.0, f64::max);
        let weight_ratio = if max_payload > 0.0 {
            total_weight / max_payload
        } else {
            0.0
        };

        let max_item_volume = items.iter().map(Item::volume).fold(0.0, f64::max);
        let min_item_volume = items.iter().map(Item::volume).fold(f64::INFINITY, f64::min);
        let size_diversity = if min_item_volume > 0.0 && min_item_volume.is_finite() {
            max_item_volume / min_item_volume
        } else {
            0.0
        };

        let aspects: Vec<f64> = items
            .iter()
            .map(Item::aspect_ratio)
            .filter(|a| a.is_finite())
            .collect();
        let aspect_variance = if aspects.is_empty() {
            0.0
        } else {
            let mean = aspects.iter().sum::<f64>() / aspects.len() as f64;
            aspects.iter().map(|a| (a - mean) * (a - mean)).sum::<f64>() / aspects.len() as f64
        };

        let prices: Vec<f64> = packable
            .iter()
            .map(|c| c.price())
            .filter(|p| *p > 0.0)
            .collect();
        let price_spread = if prices.len() >= 2 {
            let max = prices.iter().fold(f64::MIN, |a, b| a.max(*b));
            let min = prices.iter().fold(f64::MAX, |a, b| a.min(*b));
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            if mean > 0.0 {
                (max - min) / mean
            } else {
                0.0
            }
        } else {
            0.0
        };

        Some(Self {
            total_items,
            total_volume,
            utilization_potential,
            fragility_ratio,
            weight_ratio,
            size_diversity,
            aspect_variance,
            price_spread,
        })
    }

    fn to_map(self) -> HashMap<String, f64> {
        HashMap::from([
            ("total_items".to_string(), self.total_items),
            ("total_volume".to_string(), self.total_volume),
            ("utilization_potential".to_string(), self.utilization_potential),
            ("fragility_ratio".to_string(), self.fragility_ratio),
            ("weight_ratio".to_string(), self.weight_ratio),
            ("size_diversity".to_string(), self.size_diversity),
            ("aspect_variance".to_string(), self.aspect_variance),
            ("price_spread".to_string(), self.price_spread),
        ])
    }
}

/// Rule-based advisor.
///
/// Thresholds come from profiling historical packing runs; each rule maps
/// an order profile to the strategy that handled it best.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAdvisor;

impl HeuristicAdvisor {
    /// Creates a new heuristic advisor.
    pub fn new() -> Self {
        Self
    }
}

impl StrategyAdvisor for HeuristicAdvisor {
    fn advise(&self, items: &[Item], catalog: &[Container]) -> Option<StrategyAdvice> {
        let features = OrderFeatures::extract(items, catalog)?;

        let (strategy, confidence) = if features.utilization_potential > 1.2 {
            // Guaranteed overflow: worth comparing whole solutions.
            (StrategyKind::Ensemble, 0.85)
        } else if features.fragility_ratio > 0.3 || features.price_spread > 0.5 {
            (StrategyKind::BestFit, 0.80)
        } else if features.size_diversity > 10.0 || features.aspect_variance > 5.0 {
            (StrategyKind::LargestFirst, 0.75)
        } else if features.weight_ratio > 0.8 {
            (StrategyKind::BestFit, 0.78)
        } else if features.utilization_potential > 0.85 {
            (StrategyKind::Greedy, 0.82)
        } else {
            (StrategyKind::Greedy, 0.70)
        };

        log::debug!(
            "advisor: {} (confidence {:.2})",
            strategy.name(),
            confidence
        );

        Some(StrategyAdvice {
            strategy,
            confidence,
            features: features.to_map(),
        })
    }
}
