//! Greedy partitioning of an order into mutually-compatible clusters.

use cartonize_core::Item;

use crate::category::{classify, CategorySet};
use crate::rules::sets_conflict;

/// Splits items into groups whose members are pairwise compatible.
///
/// Greedy clustering: the first remaining item seeds a group, then the
/// remaining items are scanned in order and absorbed when they conflict
/// with nothing already in the group. Order-sensitive and O(n²), so the
/// group count is not guaranteed minimal, but every group is internally
/// safe and the output is deterministic for a given input order.
pub fn group_compatible(items: &[Item]) -> Vec<Vec<Item>> {
    let mut remaining: Vec<(Item, CategorySet)> = items
        .iter()
        .map(|item| (item.clone(), classify(item)))
        .collect();
    let mut groups = Vec::new();

    while !remaining.is_empty() {
        let (seed, seed_set) = remaining.remove(0);
        let mut group = vec![seed];
        // Union of member category sets; a candidate conflicts with the
        // union exactly when it conflicts with some member.
        let mut group_set = seed_set;

        let mut i = 0;
        while i < remaining.len() {
            if sets_conflict(remaining[i].1, group_set) {
                i += 1;
            } else {
                let (item, set) = remaining.remove(i);
                group.push(item);
                group_set = group_set.union(set);
            }
        }

        groups.push(group);
    }

    log::debug!("{} item(s) split into {} group(s)", items.len(), groups.len());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::can_pack_together;

    #[test]
    fn test_compatible_items_stay_together() {
        let items = vec![
            Item::new("shirt", 300.0, 200.0, 50.0),
            Item::new("socks", 100.0, 80.0, 40.0),
            Item::new("mug", 90.0, 90.0, 100.0).with_fragile(true),
        ];
        let groups = group_compatible(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_electronics_and_liquids_split() {
        let items = vec![
            Item::new("phone", 150.0, 75.0, 8.0).with_hazard_class("UN3481-Lithium_Ion_Battery"),
            Item::new("shampoo", 80.0, 80.0, 200.0).with_packaging_hint("plastic_bottle"),
        ];
        let groups = group_compatible(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].id(), "phone");
        assert_eq!(groups[1][0].id(), "shampoo");
    }

    #[test]
    fn test_absorption_is_order_sensitive_but_safe() {
        let items = vec![
            Item::new("phone", 150.0, 75.0, 8.0).with_hazard_class("UN3481-Lithium_Ion_Battery"),
            Item::new("shirt", 300.0, 200.0, 50.0),
            Item::new("bottle", 70.0, 70.0, 180.0).with_packaging_hint("plastic_bottle"),
            Item::new("biscuits", 200.0, 120.0, 60.0),
        ];
        let groups = group_compatible(&items);

        // The shirt and biscuits join the phone before the bottle gets a
        // chance; the bottle ends up alone.
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].id(), "bottle");

        for group in &groups {
            assert!(can_pack_together(group));
        }
    }

    #[test]
    fn test_every_item_lands_in_exactly_one_group() {
        let items = vec![
            Item::new("a", 10.0, 10.0, 10.0).with_hazard_class("Flammable_Liquid-3"),
            Item::new("b", 10.0, 10.0, 10.0).with_hazard_class("Compressed_Gas-2"),
            Item::new("c", 10.0, 10.0, 10.0).with_hazard_class("Aerosol-2"),
            Item::new("d", 10.0, 10.0, 10.0),
        ];
        let groups = group_compatible(&items);

        let total: usize = groups.iter().map(Vec::len).sum();
        assert_eq!(total, items.len());

        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.iter().map(Item::id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_order_has_no_groups() {
        assert!(group_compatible(&[]).is_empty());
    }
}
