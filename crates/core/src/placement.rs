//! Placement and allocation result representation.

use nalgebra::Vector3;

use crate::container::Container;
use crate::geom::Aabb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single item placed inside a container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The ID of the placed item.
    pub item_id: String,

    /// Minimum corner of the placed box, in container-local coordinates.
    pub position: Vector3<f64>,

    /// Oriented extents of the placed box.
    pub size: Vector3<f64>,

    /// Orientation applied to the item.
    pub rotation: crate::geom::Rotation,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        item_id: impl Into<String>,
        position: Vector3<f64>,
        size: Vector3<f64>,
        rotation: crate::geom::Rotation,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            position,
            size,
            rotation,
        }
    }

    /// Returns the occupied volume as an AABB.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.size)
    }

    /// Returns the volume occupied by this placement.
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }
}

/// A container together with the items placed inside it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedContainer {
    /// The container that was filled.
    container: Container,

    /// Placements of the items inside the container.
    placements: Vec<Placement>,

    /// Combined weight of the placed items in grams.
    total_item_weight: f64,
}

impl PackedContainer {
    /// Creates an empty packed container.
    pub fn new(container: Container) -> Self {
        Self {
            container,
            placements: Vec::new(),
            total_item_weight: 0.0,
        }
    }

    /// Records a placement and the weight of the placed item.
    pub fn add(&mut self, placement: Placement, item_weight: f64) {
        self.placements.push(placement);
        self.total_item_weight += item_weight;
    }

    /// Returns the container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Returns the placements.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the number of placed items.
    pub fn item_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the combined weight of the placed items in grams.
    pub fn total_item_weight(&self) -> f64 {
        self.total_item_weight
    }

    /// Returns the gross weight (tare plus payload) in grams.
    pub fn gross_weight(&self) -> f64 {
        self.container.tare_weight() + self.total_item_weight
    }

    /// Returns the volume occupied by the placed items.
    pub fn used_volume(&self) -> f64 {
        self.placements.iter().map(Placement::volume).sum()
    }

    /// Returns the volume utilization in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        let capacity = self.container.volume();
        if capacity > 0.0 {
            (self.used_volume() / capacity).min(1.0)
        } else {
            0.0
        }
    }

    /// Returns the free volume left in the container, clamped at zero.
    pub fn remaining_volume(&self) -> f64 {
        (self.container.volume() - self.used_volume()).max(0.0)
    }
}

/// Result of an allocation run: one or more packed containers.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationResult {
    /// Packed containers, in the order they were opened.
    packed: Vec<PackedContainer>,

    /// Name of the strategy that produced this result.
    strategy: Option<String>,
}

impl AllocationResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategy name.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Appends a packed container.
    pub fn push(&mut self, packed: PackedContainer) {
        self.packed.push(packed);
    }

    /// Returns the packed containers.
    pub fn containers(&self) -> &[PackedContainer] {
        &self.packed
    }

    /// Consumes the result and returns the packed containers.
    pub fn into_containers(self) -> Vec<PackedContainer> {
        self.packed
    }

    /// Returns the strategy name, if recorded.
    pub fn strategy(&self) -> Option<&str> {
        self.strategy.as_deref()
    }

    /// Returns the number of containers used.
    pub fn container_count(&self) -> usize {
        self.packed.len()
    }

    /// Returns the total number of placed items.
    pub fn item_count(&self) -> usize {
        self.packed.iter().map(PackedContainer::item_count).sum()
    }

    /// Returns the combined price of the containers used.
    pub fn total_price(&self) -> f64 {
        self.packed.iter().map(|p| p.container().price()).sum()
    }

    /// Returns the combined inner volume of the containers used.
    pub fn total_container_volume(&self) -> f64 {
        self.packed.iter().map(|p| p.container().volume()).sum()
    }

    /// Returns the combined volume of the placed items.
    pub fn total_item_volume(&self) -> f64 {
        self.packed.iter().map(PackedContainer::used_volume).sum()
    }

    /// Returns the mean volume utilization across containers.
    pub fn average_utilization(&self) -> f64 {
        if self.packed.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.packed.iter().map(PackedContainer::utilization).sum();
        sum / self.packed.len() as f64
    }
}
