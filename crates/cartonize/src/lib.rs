//! # Cartonize
//!
//! 3D packing and container allocation engine with safety constraints.
//!
//! Given an order of items and a catalog of containers, cartonize computes
//! a concrete placement (position, rotation) for every item, splits the
//! order across containers when it has to, and keeps incompatible items
//! (lithium batteries and liquids, flammables and gas cylinders, ...)
//! out of the same box.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cartonize::{Container, Item, SafePacker};
//!
//! let items = vec![
//!     Item::new("phone", 150.0, 75.0, 8.0)
//!         .with_weight(180.0)
//!         .with_hazard_class("UN3481-Lithium_Ion_Battery"),
//!     Item::new("shampoo", 80.0, 80.0, 200.0)
//!         .with_weight(500.0)
//!         .with_packaging_hint("plastic_bottle"),
//! ];
//! let catalog = vec![
//!     Container::new("box-s", 200.0, 200.0, 200.0).with_price(0.8),
//!     Container::new("box-l", 400.0, 400.0, 400.0).with_price(2.4),
//! ];
//!
//! let result = SafePacker::new().pack_order_safely(&items, &catalog)?;
//! println!("{} containers, {} groups", result.container_count(), result.group_count());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialization support across all result types

/// Item, container and placement primitives.
pub use cartonize_core as core;

/// Placement search and allocation strategies.
pub use cartonize_engine as engine;

/// Compatibility rules and safe-packing orchestration.
pub use cartonize_safety as safety;

// Re-export commonly used types at root level
pub use cartonize_core::{
    AllocationResult, Container, ContainerKind, Error, Item, PackedContainer, Placement, Result,
};
pub use cartonize_engine::{
    Allocator, HeuristicAdvisor, Placer, StrategyAdvice, StrategyAdvisor, StrategyKind,
};
pub use cartonize_safety::{SafePacker, SafePackingReport, SafePackingResult};
