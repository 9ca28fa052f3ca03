//! # Cartonize Safety
//!
//! Compatibility rules and safe-packing orchestration for the cartonize
//! allocation engine.
//!
//! Items carrying hazard classifications, fragile flags or telling
//! packaging hints are mapped to safety categories; a fixed table of
//! incompatible category pairs keeps e.g. lithium batteries away from
//! liquids. [`SafePacker`] splits an order into mutually-compatible
//! groups, allocates each group separately and cross-checks the result.
//!
//! ## Core Components
//!
//! - [`Category`] / [`CategorySet`]: the closed safety-category set
//! - [`rules`]: the incompatibility table and pairwise checks
//! - [`group_compatible`]: greedy partitioning into safe clusters
//! - [`SafePacker`]: grouping, per-group allocation and validation
//!
//! ## Feature Flags
//!
//! - `serde`: enables serialization for categories, results and reports

pub mod category;
pub mod grouper;
pub mod orchestrator;
pub mod rules;

// Re-exports
pub use category::{classify, primary_category, Category, CategorySet};
pub use grouper::group_compatible;
pub use orchestrator::{
    validate_packing_safety, ContainerSummary, SafePacker, SafePackingReport, SafePackingResult,
    ADVISOR_CONFIDENCE_THRESHOLD,
};
pub use rules::{are_compatible, can_pack_together, incompatibility_reason, INCOMPATIBLE_PAIRS};
