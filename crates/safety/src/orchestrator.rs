//! Safe-packing orchestration.
//!
//! [`SafePacker`] is the top-level entry point: it partitions an order
//! into compatibility groups, allocates each group with a strategy picked
//! per group, fails fast when any group cannot be packed, and cross-checks
//! the final containers against the compatibility rules.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use cartonize_core::{AllocationResult, Container, Error, Item, PackedContainer, Result};
use cartonize_engine::{Allocator, StrategyAdvisor, StrategyKind};

use crate::category::primary_category;
use crate::grouper::group_compatible;
use crate::rules::incompatibility_reason;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum advisor confidence for a recommendation to be followed.
pub const ADVISOR_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Groups up to this size try a single container first.
const SMALL_GROUP_LIMIT: usize = 3;

/// Groups above this size go straight to greedy utilization.
const LARGE_GROUP_LIMIT: usize = 10;

/// Compatibility-aware packing front end.
///
/// Wraps an [`Allocator`] and an optional [`StrategyAdvisor`]. The advisor
/// is consulted per compatibility group; a recommendation below
/// [`ADVISOR_CONFIDENCE_THRESHOLD`] falls back to
/// [`StrategyKind::Intelligent`], and with no advice at all the strategy
/// is picked from the group size.
#[derive(Default)]
pub struct SafePacker {
    allocator: Allocator,
    advisor: Option<Box<dyn StrategyAdvisor>>,
}

impl SafePacker {
    /// Creates a safe packer with default allocation settings and no advisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the allocator.
    pub fn with_allocator(mut self, allocator: Allocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Installs a strategy advisor.
    pub fn with_advisor(mut self, advisor: impl StrategyAdvisor + 'static) -> Self {
        self.advisor = Some(Box::new(advisor));
        self
    }

    /// Returns the underlying allocator.
    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Packs an order under compatibility constraints, picking a strategy
    /// per group automatically.
    pub fn pack_order_safely(
        &self,
        items: &[Item],
        catalog: &[Container],
    ) -> Result<SafePackingResult> {
        self.pack_order_with(None, items, catalog)
    }

    /// Packs an order under compatibility constraints.
    ///
    /// An explicit `strategy` overrides both the advisor and the size-based
    /// default for every group. Fails with [`Error::GroupPackingFailed`] as
    /// soon as any group cannot be fully placed; no partial results are
    /// returned.
    pub fn pack_order_with(
        &self,
        strategy: Option<StrategyKind>,
        items: &[Item],
        catalog: &[Container],
    ) -> Result<SafePackingResult> {
        let groups = group_compatible(items);
        let mut allocations = Vec::with_capacity(groups.len());
        let mut warnings = Vec::new();

        for (index, group) in groups.iter().enumerate() {
            let kind = strategy.unwrap_or_else(|| self.strategy_for_group(group, catalog));
            log::debug!(
                "packing group {} ({} item(s)) with {}",
                index,
                group.len(),
                kind
            );

            let allocation = match self.allocator.allocate(kind, group, catalog) {
                Ok(allocation) => allocation,
                Err(Error::AllocationExhausted { .. }) => {
                    log::warn!("group {} ({} item(s)) could not be packed", index, group.len());
                    return Err(Error::GroupPackingFailed {
                        group_index: index,
                        group_size: group.len(),
                    });
                }
                Err(other) => return Err(other),
            };

            if allocation.container_count() > 1 {
                let categories: BTreeSet<&str> =
                    group.iter().map(|i| primary_category(i).name()).collect();
                warnings.push(format!(
                    "group {} ({}) needed {} containers",
                    index,
                    categories.into_iter().collect::<Vec<_>>().join(", "),
                    allocation.container_count()
                ));
            }

            allocations.push(allocation);
        }

        warnings.extend(validate_packing_safety(&allocations, items));

        Ok(SafePackingResult {
            allocations,
            groups,
            warnings,
        })
    }

    fn strategy_for_group(&self, group: &[Item], catalog: &[Container]) -> StrategyKind {
        if let Some(advisor) = &self.advisor {
            if let Some(advice) = advisor.advise(group, catalog) {
                if advice.confidence >= ADVISOR_CONFIDENCE_THRESHOLD {
                    log::debug!(
                        "following advised strategy {} (confidence {:.2})",
                        advice.strategy,
                        advice.confidence
                    );
                    return advice.strategy;
                }
                log::debug!(
                    "advice below confidence threshold ({:.2}), using intelligent",
                    advice.confidence
                );
                return StrategyKind::Intelligent;
            }
        }

        if group.len() <= SMALL_GROUP_LIMIT {
            StrategyKind::Intelligent
        } else if group.len() > LARGE_GROUP_LIMIT {
            StrategyKind::Greedy
        } else {
            StrategyKind::BestFit
        }
    }
}

/// Cross-checks packed containers against the compatibility rules.
///
/// Returns one warning per incompatible pair found sharing a container.
/// A non-empty return indicates an allocation bug, since the grouper
/// should have kept such items apart; callers log and surface these
/// rather than failing the order.
pub fn validate_packing_safety(allocations: &[AllocationResult], items: &[Item]) -> Vec<String> {
    let lookup: HashMap<&str, &Item> = items.iter().map(|item| (item.id(), item)).collect();
    let mut warnings = Vec::new();

    for allocation in allocations {
        for packed in allocation.containers() {
            let members: Vec<&Item> = packed
                .placements()
                .iter()
                .filter_map(|p| lookup.get(p.item_id.as_str()).copied())
                .collect();

            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    if let Some(reason) = incompatibility_reason(a, b) {
                        let warning = format!(
                            "container '{}' holds incompatible items '{}' and '{}': {}",
                            packed.container().id(),
                            a.id(),
                            b.id(),
                            reason
                        );
                        log::warn!("{}", warning);
                        warnings.push(warning);
                    }
                }
            }
        }
    }

    warnings
}

/// Outcome of a safe packing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafePackingResult {
    allocations: Vec<AllocationResult>,
    groups: Vec<Vec<Item>>,
    warnings: Vec<String>,
}

impl SafePackingResult {
    /// Returns the allocation of each compatibility group, in group order.
    pub fn allocations(&self) -> &[AllocationResult] {
        &self.allocations
    }

    /// Returns the compatibility groups the order was split into.
    pub fn groups(&self) -> &[Vec<Item>] {
        &self.groups
    }

    /// Returns the warnings raised during packing and validation.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the number of compatibility groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the total number of containers across all groups.
    pub fn container_count(&self) -> usize {
        self.allocations.iter().map(AllocationResult::container_count).sum()
    }

    /// Returns the total number of placed items.
    pub fn item_count(&self) -> usize {
        self.allocations.iter().map(AllocationResult::item_count).sum()
    }

    /// Returns the combined price of all containers.
    pub fn total_price(&self) -> f64 {
        self.allocations.iter().map(AllocationResult::total_price).sum()
    }

    /// Iterates every packed container across all groups.
    pub fn containers(&self) -> impl Iterator<Item = &PackedContainer> {
        self.allocations.iter().flat_map(AllocationResult::containers)
    }

    /// Returns the mean utilization over all containers, 0 when empty.
    pub fn average_utilization(&self) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for packed in self.containers() {
            sum += packed.utilization();
            count += 1;
        }
        if count > 0 {
            sum / count as f64
        } else {
            0.0
        }
    }

    /// Builds a summary report of the run.
    pub fn report(&self) -> SafePackingReport {
        let all_items: Vec<&Item> = self.groups.iter().flatten().collect();
        let lookup: HashMap<&str, &Item> =
            all_items.iter().map(|item| (item.id(), *item)).collect();

        let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
        for &item in &all_items {
            *category_counts
                .entry(primary_category(item).name().to_string())
                .or_insert(0) += 1;
        }

        let containers = self
            .containers()
            .map(|packed| {
                let categories: BTreeSet<&str> = packed
                    .placements()
                    .iter()
                    .filter_map(|p| lookup.get(p.item_id.as_str()).copied())
                    .map(|item| primary_category(item).name())
                    .collect();
                ContainerSummary {
                    container_id: packed.container().id().to_string(),
                    item_count: packed.item_count(),
                    utilization: packed.utilization(),
                    categories: categories.into_iter().map(str::to_string).collect(),
                }
            })
            .collect();

        SafePackingReport {
            total_items: all_items.len(),
            container_count: self.container_count(),
            group_count: self.group_count(),
            hazardous_items: all_items.iter().filter(|i| i.hazard_class().is_some()).count(),
            fragile_items: all_items.iter().filter(|i| i.is_fragile()).count(),
            total_price: self.total_price(),
            average_utilization: self.average_utilization(),
            category_counts,
            containers,
            warnings: self.warnings.clone(),
        }
    }
}

/// Flat summary of a safe packing run, suitable for reporting layers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafePackingReport {
    /// Number of items in the order.
    pub total_items: usize,
    /// Number of containers used.
    pub container_count: usize,
    /// Number of compatibility groups.
    pub group_count: usize,
    /// Items carrying a hazard classification.
    pub hazardous_items: usize,
    /// Items flagged fragile.
    pub fragile_items: usize,
    /// Combined container price.
    pub total_price: f64,
    /// Mean container utilization.
    pub average_utilization: f64,
    /// Item count per primary category.
    pub category_counts: BTreeMap<String, usize>,
    /// Per-container breakdown, in allocation order.
    pub containers: Vec<ContainerSummary>,
    /// Warnings raised during packing and validation.
    pub warnings: Vec<String>,
}

/// Per-container slice of a [`SafePackingReport`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerSummary {
    /// Catalog identifier of the container.
    pub container_id: String,
    /// Number of items placed in it.
    pub item_count: usize,
    /// Used volume over inner volume.
    pub utilization: f64,
    /// Sorted primary categories present in the container.
    pub categories: Vec<String>,
}
