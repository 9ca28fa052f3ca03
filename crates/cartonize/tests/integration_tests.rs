//! End-to-end scenarios through the cartonize facade.

use approx::assert_relative_eq;

use cartonize::{Allocator, Container, Error, Item, SafePacker, StrategyKind};

mod placement_scenarios {
    use super::*;

    #[test]
    fn test_single_item_lands_at_origin() {
        let items = vec![Item::new("cube", 100.0, 100.0, 100.0).with_weight(500.0)];
        let catalog = vec![Container::new("box", 200.0, 200.0, 200.0)
            .with_max_weight(5_000.0)
            .with_price(1.0)];

        let result = SafePacker::new().pack_order_safely(&items, &catalog).unwrap();
        assert_eq!(result.container_count(), 1);

        let packed = result.containers().next().unwrap();
        assert_eq!(packed.placements().len(), 1);
        let placement = &packed.placements()[0];
        assert_relative_eq!(placement.position.x, 0.0);
        assert_relative_eq!(placement.position.y, 0.0);
        assert_relative_eq!(placement.position.z, 0.0);
        assert_relative_eq!(packed.utilization(), 0.125);
    }

    #[test]
    fn test_rotation_preserves_dimension_multiset() {
        // Only a rotated orientation fits this container.
        let items = vec![Item::new("plank", 180.0, 40.0, 90.0)];
        let catalog = vec![Container::new("box", 100.0, 200.0, 100.0).with_price(1.0)];

        let result = Allocator::new()
            .allocate(StrategyKind::Intelligent, &items, &catalog)
            .unwrap();
        let packed = &result.containers()[0];
        let placement = &packed.placements()[0];

        let mut placed = [placement.size.x, placement.size.y, placement.size.z];
        let mut original = [180.0, 40.0, 90.0];
        placed.sort_by(|a, b| a.partial_cmp(b).unwrap());
        original.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (p, o) in placed.iter().zip(&original) {
            assert_relative_eq!(*p, *o);
        }
    }

    #[test]
    fn test_overweight_item_is_still_placed() {
        // Payload limits are not enforced by the placer; the placement
        // succeeds even though the item outweighs the container payload.
        let items = vec![Item::new("anvil", 100.0, 100.0, 100.0).with_weight(10_000.0)];
        let catalog = vec![Container::new("box", 200.0, 200.0, 200.0)
            .with_max_weight(5_000.0)
            .with_price(1.0)];

        let result = SafePacker::new().pack_order_safely(&items, &catalog).unwrap();
        assert_eq!(result.item_count(), 1);

        let packed = result.containers().next().unwrap();
        assert!(packed.total_item_weight() > packed.container().max_weight());
    }
}

mod allocation_scenarios {
    use super::*;

    #[test]
    fn test_overflow_order_splits_with_high_utilization() {
        // Ten cubes at 2.5x the largest container volume; the catalog is
        // sized so full layers come out flush.
        let items: Vec<Item> = (0..10)
            .map(|i| Item::new(format!("cube-{}", i), 100.0, 100.0, 100.0).with_weight(800.0))
            .collect();
        let catalog = vec![
            Container::new("quad", 200.0, 200.0, 100.0).with_price(2.0),
            Container::new("duo", 200.0, 100.0, 100.0).with_price(1.2),
            Container::new("solo", 100.0, 100.0, 100.0).with_price(0.7),
        ];

        let result = Allocator::new()
            .allocate(StrategyKind::Greedy, &items, &catalog)
            .unwrap();

        assert!(result.container_count() >= 2);
        assert_eq!(result.item_count(), 10);
        assert!(result.average_utilization() > 0.6);
    }

    #[test]
    fn test_oversize_item_is_a_total_failure() {
        let items = vec![
            Item::new("shirt", 100.0, 100.0, 50.0),
            // Smallest dimension larger than any container edge.
            Item::new("wardrobe", 900.0, 600.0, 500.0),
        ];
        let catalog = vec![
            Container::new("s", 200.0, 200.0, 200.0).with_price(1.0),
            Container::new("m", 400.0, 400.0, 400.0).with_price(2.0),
        ];

        // No partial result: the packable shirt does not ship alone.
        let err = SafePacker::new().pack_order_safely(&items, &catalog).unwrap_err();
        assert!(matches!(err, Error::GroupPackingFailed { .. }));
    }

    #[test]
    fn test_flat_wraps_are_never_packed() {
        let items = vec![Item::new("book", 200.0, 150.0, 30.0)];

        // A catalog of only flat wraps cannot pack a box.
        let wraps_only = vec![Container::flat_wrap("mailer", 350.0, 250.0)];
        let err = Allocator::new()
            .allocate(StrategyKind::Intelligent, &items, &wraps_only)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));

        // With a solid box present, the wrap is skipped.
        let mixed = vec![
            Container::flat_wrap("mailer", 350.0, 250.0),
            Container::new("box", 250.0, 200.0, 100.0).with_price(0.9),
        ];
        let result = Allocator::new()
            .allocate(StrategyKind::Intelligent, &items, &mixed)
            .unwrap();
        assert_eq!(result.containers()[0].container().id(), "box");
    }
}

mod safety_scenarios {
    use super::*;

    #[test]
    fn test_incompatible_pair_needs_two_containers() {
        let items = vec![
            Item::new("phone", 150.0, 75.0, 8.0)
                .with_hazard_class("UN3481-Lithium_Ion_Battery"),
            Item::new("bottle", 70.0, 70.0, 180.0).with_packaging_hint("plastic_bottle"),
        ];
        let catalog = vec![
            Container::new("s", 200.0, 200.0, 200.0).with_price(1.0),
            Container::new("l", 300.0, 300.0, 300.0).with_price(2.0),
        ];

        let result = SafePacker::new().pack_order_safely(&items, &catalog).unwrap();
        assert_eq!(result.group_count(), 2);
        assert!(result.container_count() >= 2);

        let report = result.report();
        assert_eq!(report.category_counts["electronics"], 1);
        assert_eq!(report.category_counts["liquids"], 1);
    }

    #[test]
    fn test_advised_packing_through_the_facade() {
        let items: Vec<Item> = (0..12)
            .map(|i| Item::new(format!("cube-{}", i), 100.0, 100.0, 100.0).with_weight(400.0))
            .collect();
        let catalog = vec![
            Container::new("m", 300.0, 300.0, 200.0).with_price(1.4),
            Container::new("l", 400.0, 400.0, 300.0).with_price(2.2),
        ];

        let packer = SafePacker::new().with_advisor(cartonize::HeuristicAdvisor::new());
        let result = packer.pack_order_safely(&items, &catalog).unwrap();
        assert_eq!(result.item_count(), 12);
        assert!(result.warnings().iter().all(|w| !w.contains("incompatible")));
    }
}
