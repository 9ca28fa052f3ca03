//! Item types for 3D packing.

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::geom::EPSILON;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular item to be packed.
///
/// Dimensions are in millimeters (x = length, y = width, z = height),
/// weight is in grams.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Unique identifier (SKU or order line id).
    id: String,

    /// Dimensions (length, width, height).
    dimensions: Vector3<f64>,

    /// Weight in grams.
    weight: f64,

    /// Whether the item needs fragile handling.
    fragile: bool,

    /// Hazard classification code, if any (e.g. "UN3481-Lithium_Ion_Battery").
    hazard_class: Option<String>,

    /// Packaging hint, if any (e.g. "glass_jar").
    packaging_hint: Option<String>,
}

impl Item {
    /// Creates a new item with the given ID and dimensions.
    pub fn new(id: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(length, width, height),
            weight: 0.0,
            fragile: false,
            hazard_class: None,
            packaging_hint: None,
        }
    }

    /// Sets the weight in grams.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Marks the item as fragile.
    pub fn with_fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    /// Sets the hazard classification code.
    pub fn with_hazard_class(mut self, code: impl Into<String>) -> Self {
        self.hazard_class = Some(code.into());
        self
    }

    /// Sets the packaging hint.
    pub fn with_packaging_hint(mut self, hint: impl Into<String>) -> Self {
        self.packaging_hint = Some(hint.into());
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the dimensions (length, width, height).
    pub fn dimensions(&self) -> Vector3<f64> {
        self.dimensions
    }

    /// Returns the length (x extent).
    pub fn length(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the width (y extent).
    pub fn width(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height (z extent).
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the weight in grams.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns whether the item is fragile.
    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    /// Returns the hazard classification code.
    pub fn hazard_class(&self) -> Option<&str> {
        self.hazard_class.as_deref()
    }

    /// Returns the packaging hint.
    pub fn packaging_hint(&self) -> Option<&str> {
        self.packaging_hint.as_deref()
    }

    /// Returns the volume in cubic millimeters.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns the density in grams per cubic millimeter.
    pub fn density(&self) -> f64 {
        let volume = self.volume();
        if volume > EPSILON {
            self.weight / volume
        } else {
            0.0
        }
    }

    /// Returns the ratio of the longest to the shortest dimension.
    ///
    /// A cube has aspect ratio 1; elongated items score higher.
    pub fn aspect_ratio(&self) -> f64 {
        let longest = self.dimensions.x.max(self.dimensions.y).max(self.dimensions.z);
        let shortest = self.dimensions.x.min(self.dimensions.y).min(self.dimensions.z);
        if shortest > EPSILON {
            longest / shortest
        } else {
            f64::INFINITY
        }
    }

    /// Returns whether the item needs special care (fragile or hazardous).
    pub fn needs_care(&self) -> bool {
        self.fragile || self.hazard_class.is_some()
    }

    /// Validates the item definition.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidItem {
                id: "<unnamed>".to_string(),
                reason: "identifier must not be empty".to_string(),
            });
        }

        if self.dimensions.x <= 0.0 || self.dimensions.y <= 0.0 || self.dimensions.z <= 0.0 {
            return Err(Error::InvalidItem {
                id: self.id.clone(),
                reason: "all dimensions must be positive".to_string(),
            });
        }

        if self.weight < 0.0 {
            return Err(Error::InvalidItem {
                id: self.id.clone(),
                reason: "weight cannot be negative".to_string(),
            });
        }

        Ok(())
    }
}
