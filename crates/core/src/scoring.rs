//! Scoring policy for placement and container selection.
//!
//! Every tunable weight used by the packing heuristics lives here, so a
//! single [`ScoringPolicy`] value describes the engine's behavior end to
//! end. All weight groups default to the production tuning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weights for ordering items before placement.
///
/// Items are sorted by descending priority score; a higher score packs
/// earlier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriorityWeights {
    /// Weight of normalized item volume.
    pub volume: f64,
    /// Weight of normalized item density.
    pub density: f64,
    /// Weight of cubic-ness (inverse aspect ratio).
    pub cubic: f64,
    /// Penalty applied to fragile or hazardous items so they pack later
    /// and end up higher in the container.
    pub care_penalty: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            volume: 1.0,
            density: 0.3,
            cubic: 0.2,
            care_penalty: 0.15,
        }
    }
}

/// Weights for scoring a single candidate position inside a container.
///
/// Placement fitness is a penalty: lower is better. The ground bonus
/// dominates the corner pull, which in turn dominates the balance term,
/// so items settle floor-first, then toward the origin corner, and only
/// then adjust for weight balance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementWeights {
    /// Penalty per unit of normalized distance from the origin corner.
    pub corner: f64,
    /// Penalty per unit of normalized placement height.
    pub height: f64,
    /// Bonus for resting directly on the container floor.
    pub ground_bonus: f64,
    /// Bonus scaled by the fraction of side walls touched.
    pub wall_bonus: f64,
    /// Penalty per unit of normalized center-of-mass offset.
    pub balance: f64,
}

impl Default for PlacementWeights {
    fn default() -> Self {
        Self {
            corner: 10.0,
            height: 5.0,
            ground_bonus: 25.0,
            wall_bonus: 5.0,
            balance: 2.0,
        }
    }
}

/// Weights for the greedy per-step container choice.
///
/// Each candidate container is scored by what a best-effort fill of the
/// remaining items achieves in it; higher is better.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerWeights {
    /// Weight of volume utilization.
    pub utilization: f64,
    /// Weight of payload (weight capacity) usage.
    pub density: f64,
    /// Weight of the fraction of remaining items absorbed.
    pub item_ratio: f64,
    /// Weight of relative container cost (cheapest scores 1).
    pub cost: f64,
}

impl Default for ContainerWeights {
    fn default() -> Self {
        Self {
            utilization: 0.50,
            density: 0.30,
            item_ratio: 0.15,
            cost: 0.05,
        }
    }
}

/// Weights for the intelligent multi-container selection blend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionWeights {
    /// Weight of volume utilization.
    pub utilization: f64,
    /// Weight of size appropriateness (container volume versus the
    /// remaining item volume).
    pub size_fit: f64,
    /// Weight of the fraction of remaining items absorbed.
    pub item_efficiency: f64,
    /// Weight of shape compatibility (largest item versus container).
    pub shape: f64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            utilization: 0.40,
            size_fit: 0.25,
            item_efficiency: 0.20,
            shape: 0.15,
        }
    }
}

/// Weights for ranking complete solutions in the ensemble strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolutionWeights {
    /// Weight of cost efficiency (cheapest solution scores 1).
    pub cost_efficiency: f64,
    /// Weight of mean container utilization.
    pub container_efficiency: f64,
    /// Weight of the fraction of items packed.
    pub items_packed: f64,
    /// Weight of the inverse container count.
    pub container_count: f64,
}

impl Default for SolutionWeights {
    fn default() -> Self {
        Self {
            cost_efficiency: 0.40,
            container_efficiency: 0.30,
            items_packed: 0.20,
            container_count: 0.10,
        }
    }
}

/// Complete scoring policy for the packing engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoringPolicy {
    /// Item ordering weights.
    pub priority: PriorityWeights,
    /// Candidate position weights.
    pub placement: PlacementWeights,
    /// Greedy container choice weights.
    pub container: ContainerWeights,
    /// Intelligent selection weights.
    pub selection: SelectionWeights,
    /// Ensemble solution ranking weights.
    pub solution: SolutionWeights,
}

impl ScoringPolicy {
    /// Creates the default production policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the item ordering weights.
    pub fn with_priority(mut self, weights: PriorityWeights) -> Self {
        self.priority = weights;
        self
    }

    /// Replaces the candidate position weights.
    pub fn with_placement(mut self, weights: PlacementWeights) -> Self {
        self.placement = weights;
        self
    }

    /// Replaces the greedy container choice weights.
    pub fn with_container(mut self, weights: ContainerWeights) -> Self {
        self.container = weights;
        self
    }

    /// Replaces the intelligent selection weights.
    pub fn with_selection(mut self, weights: SelectionWeights) -> Self {
        self.selection = weights;
        self
    }

    /// Replaces the ensemble solution ranking weights.
    pub fn with_solution(mut self, weights: SolutionWeights) -> Self {
        self.solution = weights;
        self
    }
}
