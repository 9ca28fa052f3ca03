//! Container types for 3D packing.

use nalgebra::Vector3;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nominal thickness assigned to flat-wrap packaging, in millimeters.
pub const FLAT_WRAP_THICKNESS: f64 = 20.0;

/// Physical form of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContainerKind {
    /// A rigid box with a usable interior volume.
    #[default]
    SolidBox,
    /// Flat packaging (envelope, mailer) that cannot hold rigid boxes.
    FlatWrap,
}

/// A container from the packing catalog.
///
/// Inner dimensions are in millimeters, weights in grams.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Unique identifier.
    id: String,

    /// Usable inner dimensions (length, width, height).
    inner: Vector3<f64>,

    /// Physical form.
    kind: ContainerKind,

    /// Weight of the empty container in grams.
    tare_weight: f64,

    /// Maximum payload weight in grams (0 = unspecified).
    max_weight: f64,

    /// Unit price of the container (0 = free or unknown).
    price: f64,
}

impl Container {
    /// Creates a new solid box container with the given inner dimensions.
    pub fn new(id: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            inner: Vector3::new(length, width, height),
            kind: ContainerKind::SolidBox,
            tare_weight: 0.0,
            max_weight: 0.0,
            price: 0.0,
        }
    }

    /// Creates a flat-wrap container (envelope or mailer).
    ///
    /// Flat wraps carry a nominal [`FLAT_WRAP_THICKNESS`] so their volume
    /// is well defined, but they are never eligible for box packing.
    pub fn flat_wrap(id: impl Into<String>, length: f64, width: f64) -> Self {
        Self {
            id: id.into(),
            inner: Vector3::new(length, width, FLAT_WRAP_THICKNESS),
            kind: ContainerKind::FlatWrap,
            tare_weight: 0.0,
            max_weight: 0.0,
            price: 0.0,
        }
    }

    /// Sets the tare weight in grams.
    pub fn with_tare_weight(mut self, weight: f64) -> Self {
        self.tare_weight = weight;
        self
    }

    /// Sets the maximum payload weight in grams.
    pub fn with_max_weight(mut self, weight: f64) -> Self {
        self.max_weight = weight;
        self
    }

    /// Sets the unit price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the inner dimensions (length, width, height).
    pub fn inner_dimensions(&self) -> Vector3<f64> {
        self.inner
    }

    /// Returns the physical form.
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Returns the tare weight in grams.
    pub fn tare_weight(&self) -> f64 {
        self.tare_weight
    }

    /// Returns the maximum payload weight in grams (0 = unspecified).
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Returns the unit price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the usable inner volume in cubic millimeters.
    pub fn volume(&self) -> f64 {
        self.inner.x * self.inner.y * self.inner.z
    }

    /// Returns whether the container can hold rigid 3D boxes.
    ///
    /// Flat wraps and containers with a degenerate interior are excluded
    /// from allocation.
    pub fn is_packable(&self) -> bool {
        self.kind == ContainerKind::SolidBox
            && self.inner.x > 0.0
            && self.inner.y > 0.0
            && self.inner.z > 0.0
    }

    /// Validates the container definition.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidContainer {
                id: "<unnamed>".to_string(),
                reason: "identifier must not be empty".to_string(),
            });
        }

        if self.inner.x < 0.0 || self.inner.y < 0.0 || self.inner.z < 0.0 {
            return Err(Error::InvalidContainer {
                id: self.id.clone(),
                reason: "dimensions cannot be negative".to_string(),
            });
        }

        if self.tare_weight < 0.0 || self.max_weight < 0.0 {
            return Err(Error::InvalidContainer {
                id: self.id.clone(),
                reason: "weights cannot be negative".to_string(),
            });
        }

        if self.price < 0.0 {
            return Err(Error::InvalidContainer {
                id: self.id.clone(),
                reason: "price cannot be negative".to_string(),
            });
        }

        Ok(())
    }
}
