//! # Cartonize Engine
//!
//! Placement and container-selection algorithms for the cartonize
//! allocation engine.
//!
//! This crate turns an order (a list of items) and a container catalog into
//! an [`AllocationResult`]: a corner-point placer packs items into single
//! containers, and a set of allocation strategies decides which containers
//! to open and in what order.
//!
//! ## Core Components
//!
//! - [`Placer`]: packs items into one container at corner-point candidates
//! - [`FreeSpaceGrid`]: voxel scan of unoccupied space for gap recovery
//! - [`Allocator`]: runs an allocation strategy over a container catalog
//! - [`StrategyKind`]: the available allocation strategies
//! - [`StrategyAdvisor`]: pluggable strategy recommendation from order features
//!
//! ## Feature Flags
//!
//! - `serde`: enables serialization for advice and strategy types

pub mod advisor;
pub mod allocator;
pub mod gaps;
pub mod placer;

mod strategy;

// Re-exports
pub use advisor::{HeuristicAdvisor, NullAdvisor, OrderFeatures, StrategyAdvice, StrategyAdvisor};
pub use allocator::{Allocator, StrategyKind};
pub use gaps::FreeSpaceGrid;
pub use placer::Placer;
pub use cartonize_core::{AllocationResult, Container, Error, Item, PackedContainer, Result};
