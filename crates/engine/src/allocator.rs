//! Strategy dispatch for packing an order against a container catalog.

use cartonize_core::scoring::ScoringPolicy;
use cartonize_core::{AllocationResult, Container, Error, Item, Result};

use crate::placer::Placer;
use crate::strategy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packing strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrategyKind {
    /// One container when the order fits, cost-aware multi-container
    /// fallback otherwise.
    #[default]
    Intelligent,
    /// Maximize what each opened container absorbs, step by step.
    Greedy,
    /// Minimize wasted volume per opened container.
    BestFit,
    /// Visit large containers first, keep the best items-per-cost fill.
    LargestFirst,
    /// Run several strategies and keep the best whole solution.
    Ensemble,
}

impl StrategyKind {
    /// All strategies, in the order the ensemble runs them.
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Intelligent,
        StrategyKind::Greedy,
        StrategyKind::BestFit,
        StrategyKind::LargestFirst,
        StrategyKind::Ensemble,
    ];

    /// Canonical name used in results and logs.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Intelligent => "intelligent",
            StrategyKind::Greedy => "greedy",
            StrategyKind::BestFit => "best_fit",
            StrategyKind::LargestFirst => "largest_first",
            StrategyKind::Ensemble => "ensemble",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry point for packing an order with a chosen strategy.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    placer: Placer,
}

impl Allocator {
    /// Creates an allocator with the default scoring policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator with a custom scoring policy.
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self {
            placer: Placer::new(policy),
        }
    }

    /// Replaces the placement engine.
    pub fn with_placer(mut self, placer: Placer) -> Self {
        self.placer = placer;
        self
    }

    /// Returns the placement engine.
    pub fn placer(&self) -> &Placer {
        &self.placer
    }

    /// Packs the order with the given strategy.
    ///
    /// Validates every item and container, drops non-packable containers
    /// from the catalog, and fails with [`Error::EmptyCatalog`] when no
    /// packable container remains. Strategies place every item or fail
    /// with [`Error::AllocationExhausted`]; partial allocations are never
    /// returned.
    pub fn allocate(
        &self,
        strategy: StrategyKind,
        items: &[Item],
        catalog: &[Container],
    ) -> Result<AllocationResult> {
        for item in items {
            item.validate()?;
        }
        for container in catalog {
            container.validate()?;
        }

        let packable: Vec<&Container> = catalog.iter().filter(|c| c.is_packable()).collect();
        if packable.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if packable.len() < catalog.len() {
            log::debug!(
                "dropped {} non-packable container(s) from the catalog",
                catalog.len() - packable.len()
            );
        }

        if items.is_empty() {
            return Ok(AllocationResult::new().with_strategy(strategy.name()));
        }

        match strategy {
            StrategyKind::Intelligent => {
                strategy::intelligent::allocate(&self.placer, items, &packable)
            }
            StrategyKind::Greedy => strategy::greedy::allocate(&self.placer, items, &packable),
            StrategyKind::BestFit => strategy::best_fit::allocate(&self.placer, items, &packable),
            StrategyKind::LargestFirst => {
                strategy::largest_first::allocate(&self.placer, items, &packable)
            }
            StrategyKind::Ensemble => strategy::ensemble::allocate(&self.placer, items, &packable),
        }
    }
}
