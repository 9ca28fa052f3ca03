//! Pairwise compatibility rules between safety categories.
//!
//! The incompatibility table is a fixed, symmetric set of category pairs.
//! It is folded into a per-category conflict bitmask at compile time, so a
//! compatibility check between two items is a handful of bit operations.

use cartonize_core::Item;

use crate::category::{classify, Category, CategorySet};

/// Unordered category pairs that must never share a container.
pub const INCOMPATIBLE_PAIRS: [(Category, Category); 9] = [
    (Category::Electronics, Category::Liquids),
    (Category::Electronics, Category::Corrosive),
    (Category::Electronics, Category::Flammable),
    (Category::Flammable, Category::CompressedGas),
    (Category::Flammable, Category::Aerosol),
    (Category::Corrosive, Category::Food),
    (Category::Liquids, Category::Food),
    (Category::CompressedGas, Category::Fragile),
    (Category::Aerosol, Category::Food),
];

const fn conflict_masks() -> [u16; 9] {
    let mut masks = [0u16; 9];
    let mut i = 0;
    while i < INCOMPATIBLE_PAIRS.len() {
        let pair = INCOMPATIBLE_PAIRS[i];
        masks[pair.0.index()] |= pair.1.bit();
        masks[pair.1.index()] |= pair.0.bit();
        i += 1;
    }
    masks
}

/// Conflict bitmask per category, indexed by category bit position.
const CONFLICTS: [u16; 9] = conflict_masks();

/// Returns whether two categories are forbidden from sharing a container.
pub fn categories_conflict(a: Category, b: Category) -> bool {
    CONFLICTS[a.index()] & b.bit() != 0
}

/// Returns whether any category of `a` conflicts with any category of `b`.
pub fn sets_conflict(a: CategorySet, b: CategorySet) -> bool {
    a.iter().any(|category| CONFLICTS[category.index()] & b.bits() != 0)
}

/// Returns whether two items can safely share a container.
pub fn are_compatible(a: &Item, b: &Item) -> bool {
    !sets_conflict(classify(a), classify(b))
}

/// Returns whether every pair in a set of items is compatible.
pub fn can_pack_together(items: &[Item]) -> bool {
    let sets: Vec<CategorySet> = items.iter().map(classify).collect();
    for (i, a) in sets.iter().enumerate() {
        for b in &sets[i + 1..] {
            if sets_conflict(*a, *b) {
                return false;
            }
        }
    }
    true
}

/// Explains why two items cannot share a container.
///
/// Returns `None` when the items are compatible; otherwise names the first
/// conflicting category pair.
pub fn incompatibility_reason(a: &Item, b: &Item) -> Option<String> {
    let first = classify(a);
    let second = classify(b);
    for category_a in first.iter() {
        for category_b in second.iter() {
            if categories_conflict(category_a, category_b) {
                return Some(format!("cannot pack {} with {}", category_a, category_b));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_table_is_symmetric() {
        for (a, b) in INCOMPATIBLE_PAIRS {
            assert!(categories_conflict(a, b), "{} vs {}", a, b);
            assert!(categories_conflict(b, a), "{} vs {}", b, a);
        }
    }

    #[test]
    fn test_general_conflicts_with_nothing() {
        for category in Category::ALL {
            assert!(!categories_conflict(Category::General, category));
        }
    }

    #[test]
    fn test_electronics_and_liquids_cannot_meet() {
        let phone = Item::new("phone", 150.0, 75.0, 8.0)
            .with_hazard_class("UN3481-Lithium_Ion_Battery");
        let shampoo = Item::new("shampoo", 80.0, 80.0, 200.0).with_packaging_hint("glass_jar");
        let shirt = Item::new("shirt", 300.0, 200.0, 50.0);

        assert!(!are_compatible(&phone, &shampoo));
        assert!(are_compatible(&phone, &shirt));
        assert!(are_compatible(&shampoo, &shirt));
    }

    #[test]
    fn test_multi_tag_items_use_every_tag() {
        // The jar carries both fragile and liquids; the fragile tag alone
        // is what blocks the gas cylinder.
        let jar = Item::new("jar", 90.0, 90.0, 120.0)
            .with_fragile(true)
            .with_packaging_hint("glass_jar");
        let cylinder = Item::new("cylinder", 100.0, 100.0, 300.0)
            .with_hazard_class("Compressed_Gas-2");
        let biscuits = Item::new("biscuits", 200.0, 120.0, 60.0).with_packaging_hint("food");

        assert!(!are_compatible(&jar, &cylinder));
        // "food" is not a known packaging hint, so biscuits classify as
        // general and pass.
        assert!(are_compatible(&jar, &biscuits));
    }

    #[test]
    fn test_group_compatibility_check() {
        let phone = Item::new("phone", 150.0, 75.0, 8.0)
            .with_hazard_class("UN3480-Lithium_Ion_Battery");
        let shirt = Item::new("shirt", 300.0, 200.0, 50.0);
        let bottle = Item::new("bottle", 70.0, 70.0, 180.0).with_packaging_hint("plastic_bottle");

        assert!(can_pack_together(&[phone.clone(), shirt.clone()]));
        assert!(!can_pack_together(&[phone, shirt, bottle]));
        assert!(can_pack_together(&[]));
    }

    #[test]
    fn test_reason_names_the_conflict() {
        let phone = Item::new("phone", 150.0, 75.0, 8.0)
            .with_hazard_class("UN3481-Lithium_Ion_Battery");
        let acid = Item::new("acid", 60.0, 60.0, 150.0).with_hazard_class("Corrosive-8");

        let reason = incompatibility_reason(&phone, &acid).unwrap();
        assert_eq!(reason, "cannot pack electronics with corrosive");
        assert!(incompatibility_reason(&phone, &phone.clone()).is_none());
    }
}
