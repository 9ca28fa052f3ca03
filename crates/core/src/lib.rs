//! # Cartonize Core
//!
//! Core types for the Cartonize 3D packing and allocation engine.
//!
//! This crate provides the foundational vocabulary shared by the placement
//! engine and the safety layer: items, containers, placements, results and
//! the scoring policy.
//!
//! ## Core Components
//!
//! - **Geometry**: `Aabb`, `Rotation` and the shared `EPSILON` tolerance
//! - **Catalog types**: `Item`, `Container`, `ContainerKind`
//! - **Results**: `Placement`, `PackedContainer`, `AllocationResult`
//! - **Tuning**: `ScoringPolicy` and its weight groups
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod container;
pub mod error;
pub mod geom;
pub mod item;
pub mod placement;
pub mod scoring;

// Re-exports
pub use container::{Container, ContainerKind, FLAT_WRAP_THICKNESS};
pub use error::{Error, Result};
pub use geom::{Aabb, Rotation, EPSILON};
pub use item::Item;
pub use placement::{AllocationResult, PackedContainer, Placement};
pub use scoring::{
    ContainerWeights, PlacementWeights, PriorityWeights, ScoringPolicy, SelectionWeights,
    SolutionWeights,
};
