//! Safety categories and item classification.
//!
//! Every item maps to one or more categories derived from its hazard
//! classification, fragile flag and packaging hint. Categories drive the
//! pairwise compatibility rules in [`crate::rules`].

use cartonize_core::Item;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Safety and handling category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    /// Devices and batteries (lithium cells in particular).
    Electronics,
    /// Liquid contents or liquid-tight packaging.
    Liquids,
    /// Corrosive substances (hazard class 8).
    Corrosive,
    /// Flammable liquids and solids (hazard classes 3 and 4).
    Flammable,
    /// Compressed gas cylinders (hazard class 2).
    CompressedGas,
    /// Pressurized aerosol cans.
    Aerosol,
    /// Items flagged fragile by the catalog.
    Fragile,
    /// Foodstuffs.
    Food,
    /// Everything without a more specific classification.
    #[default]
    General,
}

impl Category {
    /// All categories, in bit order.
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Liquids,
        Category::Corrosive,
        Category::Flammable,
        Category::CompressedGas,
        Category::Aerosol,
        Category::Fragile,
        Category::Food,
        Category::General,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Liquids => "liquids",
            Category::Corrosive => "corrosive",
            Category::Flammable => "flammable",
            Category::CompressedGas => "compressed_gas",
            Category::Aerosol => "aerosol",
            Category::Fragile => "fragile",
            Category::Food => "food",
            Category::General => "general",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Category::Electronics => 0,
            Category::Liquids => 1,
            Category::Corrosive => 2,
            Category::Flammable => 3,
            Category::CompressedGas => 4,
            Category::Aerosol => 5,
            Category::Fragile => 6,
            Category::Food => 7,
            Category::General => 8,
        }
    }

    pub(crate) const fn bit(self) -> u16 {
        1 << self.index()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of categories packed into a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategorySet(u16);

impl CategorySet {
    /// Creates an empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a set holding one category.
    pub const fn single(category: Category) -> Self {
        Self(category.bit())
    }

    /// Adds a category to the set.
    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    /// Returns whether the set contains a category.
    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    /// Returns the union of two sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of categories in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the contained categories in bit order.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }

    pub(crate) const fn bits(self) -> u16 {
        self.0
    }
}

/// Maps a hazard classification code to a category.
pub fn hazard_category(code: &str) -> Option<Category> {
    match code {
        "UN3481-Lithium_Ion_Battery" | "UN3480-Lithium_Ion_Battery" => Some(Category::Electronics),
        "Flammable_Liquid-3" | "Flammable_Solid-4" => Some(Category::Flammable),
        "Corrosive-8" => Some(Category::Corrosive),
        "Compressed_Gas-2" => Some(Category::CompressedGas),
        "Aerosol-2" => Some(Category::Aerosol),
        _ => None,
    }
}

/// Maps a packaging-material hint to a category.
pub fn packaging_category(hint: &str) -> Option<Category> {
    match hint {
        "glass_jar" | "plastic_bottle" => Some(Category::Liquids),
        "metal_box" | "anti_static_bag" => Some(Category::Electronics),
        _ => None,
    }
}

/// Returns every category applicable to an item.
///
/// Hazard classification, the fragile flag and the packaging hint all
/// contribute, so one item can carry several categories at once. Items
/// with no signal are [`Category::General`].
pub fn classify(item: &Item) -> CategorySet {
    let mut set = CategorySet::empty();

    if let Some(code) = item.hazard_class() {
        if let Some(category) = hazard_category(code) {
            set.insert(category);
        } else {
            log::debug!("unknown hazard code '{}' on {}", code, item.id());
        }
    }
    if item.is_fragile() {
        set.insert(Category::Fragile);
    }
    if let Some(hint) = item.packaging_hint() {
        if let Some(category) = packaging_category(hint) {
            set.insert(category);
        }
    }

    if set.is_empty() {
        set.insert(Category::General);
    }
    set
}

/// Returns the single most safety-relevant category of an item.
///
/// Priority: hazard classification, then the fragile flag, then the
/// packaging hint, then [`Category::General`].
pub fn primary_category(item: &Item) -> Category {
    if let Some(category) = item.hazard_class().and_then(hazard_category) {
        return category;
    }
    if item.is_fragile() {
        return Category::Fragile;
    }
    if let Some(category) = item.packaging_hint().and_then(packaging_category) {
        return category;
    }
    Category::General
}
