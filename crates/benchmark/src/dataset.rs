//! Synthetic order datasets for benchmarking.

use std::fs;
use std::path::Path;

use cartonize::{Container, Item};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read or write file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Shape of the generated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Identical cubes; stresses layer packing and splitting.
    Uniform,
    /// Broad size and weight spread; stresses orientation search.
    Mixed,
    /// Mixed sizes with hazard classes, fragile flags and packaging
    /// hints; stresses grouping and safe packing.
    Hazmat,
}

impl Profile {
    /// All profiles, in generation order.
    pub const ALL: [Profile; 3] = [Profile::Uniform, Profile::Mixed, Profile::Hazmat];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Uniform => "uniform",
            Profile::Mixed => "mixed",
            Profile::Hazmat => "hazmat",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A benchmark order: items to pack plus the container catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name, e.g. "mixed-48-seed7".
    pub name: String,
    /// Items to be packed.
    pub items: Vec<Item>,
    /// Available containers.
    pub catalog: Vec<Container>,
}

impl Dataset {
    /// Loads a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saves the dataset as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Combined item volume in cubic millimeters.
    pub fn total_item_volume(&self) -> f64 {
        self.items.iter().map(Item::volume).sum()
    }
}

/// Deterministic order generator.
///
/// The same seed, profile and item count always produce the same dataset,
/// so benchmark runs are reproducible across machines.
#[derive(Debug, Clone, Copy)]
pub struct DatasetGenerator {
    seed: u64,
}

impl DatasetGenerator {
    /// Creates a generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generates an order of `item_count` items for the profile.
    pub fn generate(&self, profile: Profile, item_count: usize) -> Dataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let items = match profile {
            Profile::Uniform => Self::uniform_items(item_count),
            Profile::Mixed => Self::mixed_items(&mut rng, item_count),
            Profile::Hazmat => Self::hazmat_items(&mut rng, item_count),
        };

        Dataset {
            name: format!("{}-{}-seed{}", profile, item_count, self.seed),
            items,
            catalog: standard_catalog(),
        }
    }

    fn uniform_items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::new(format!("uniform-{:03}", i), 100.0, 100.0, 100.0).with_weight(500.0))
            .collect()
    }

    fn mixed_items(rng: &mut StdRng, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let l = rng.gen_range(30.0_f64..300.0).round();
                let w = rng.gen_range(30.0_f64..300.0).round();
                let h = rng.gen_range(30.0_f64..300.0).round();
                let weight = rng.gen_range(50.0_f64..2500.0).round();
                Item::new(format!("mixed-{:03}", i), l, w, h).with_weight(weight)
            })
            .collect()
    }

    fn hazmat_items(rng: &mut StdRng, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let l = rng.gen_range(30.0_f64..160.0).round();
                let w = rng.gen_range(30.0_f64..160.0).round();
                let h = rng.gen_range(30.0_f64..160.0).round();
                let weight = rng.gen_range(100.0_f64..1500.0).round();
                let item = Item::new(format!("hazmat-{:03}", i), l, w, h).with_weight(weight);

                match rng.gen_range(0..10u8) {
                    0 | 1 => item.with_hazard_class("UN3481-Lithium_Ion_Battery"),
                    2 => item.with_hazard_class("Flammable_Liquid-3"),
                    3 => item.with_hazard_class("Aerosol-2"),
                    4 => item.with_packaging_hint("plastic_bottle"),
                    5 => item.with_packaging_hint("glass_jar").with_fragile(true),
                    6 => item.with_fragile(true),
                    _ => item,
                }
            })
            .collect()
    }
}

/// The fixed container catalog used by every generated dataset.
pub fn standard_catalog() -> Vec<Container> {
    vec![
        Container::new("box-s", 150.0, 150.0, 150.0)
            .with_tare_weight(120.0)
            .with_max_weight(5_000.0)
            .with_price(0.8),
        Container::new("box-m", 250.0, 250.0, 250.0)
            .with_tare_weight(260.0)
            .with_max_weight(12_000.0)
            .with_price(1.5),
        Container::new("box-l", 400.0, 400.0, 400.0)
            .with_tare_weight(520.0)
            .with_max_weight(25_000.0)
            .with_price(2.6),
        Container::new("box-xl", 600.0, 500.0, 400.0)
            .with_tare_weight(800.0)
            .with_max_weight(40_000.0)
            .with_price(4.1),
        Container::flat_wrap("mailer", 350.0, 250.0).with_price(0.4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_reproducible() {
        let a = DatasetGenerator::new(7).generate(Profile::Mixed, 20);
        let b = DatasetGenerator::new(7).generate(Profile::Mixed, 20);
        assert_eq!(a.items, b.items);

        let c = DatasetGenerator::new(8).generate(Profile::Mixed, 20);
        assert_ne!(a.items, c.items);
    }

    #[test]
    fn test_generated_items_are_valid() {
        for profile in Profile::ALL {
            let dataset = DatasetGenerator::new(42).generate(profile, 30);
            assert_eq!(dataset.items.len(), 30);
            for item in &dataset.items {
                assert!(item.validate().is_ok(), "{} invalid", item.id());
            }
        }
    }

    #[test]
    fn test_hazmat_profile_mixes_categories() {
        let dataset = DatasetGenerator::new(1).generate(Profile::Hazmat, 100);
        let hazardous = dataset
            .items
            .iter()
            .filter(|i| i.hazard_class().is_some())
            .count();
        let fragile = dataset.items.iter().filter(|i| i.is_fragile()).count();

        // Roughly 40% of hazmat items carry a hazard class at these odds;
        // with 100 items both classes of attribute show up.
        assert!(hazardous > 0);
        assert!(fragile > 0);
        assert!(hazardous < 100);
    }

    #[test]
    fn test_catalog_has_packable_boxes_and_a_wrap() {
        let catalog = standard_catalog();
        assert!(catalog.iter().any(|c| c.is_packable()));
        assert!(catalog.iter().any(|c| !c.is_packable()));
        for container in &catalog {
            assert!(container.validate().is_ok());
        }
    }
}
