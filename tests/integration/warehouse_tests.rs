//! Warehouse access integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::*;
    use crate::common::{DecisionAssertions, TestWorld};
    use inventory_authz::{DecisionKey, DecisionTtl, PrincipalId, WarehouseAction, WarehouseGrant};

    #[tokio::test]
    async fn test_flags_are_independent() {
        let world = TestWorld::new();

        // OPS may view and manage stock in CENTRAL, but not edit it
        for (action, expected) in [("view", true), ("edit", false), ("manage_stock", true)] {
            assert_eq!(
                world
                    .authorizer
                    .authorize_warehouse(CLERK, CENTRAL, action)
                    .await
                    .unwrap(),
                expected,
                "action {}",
                action
            );
        }
    }

    #[tokio::test]
    async fn test_manage_stock_alone_does_not_grant_view() {
        let world = TestWorld::new();
        world
            .grants
            .insert_warehouse_grant(WarehouseGrant::new(OUTLET, OPS).with_manage_stock(true));

        world
            .authorizer
            .check_warehouse(CLERK, OUTLET, WarehouseAction::ManageStock)
            .await
            .assert_allowed();
        world
            .authorizer
            .check_warehouse(CLERK, OUTLET, WarehouseAction::View)
            .await
            .assert_denied();
    }

    #[tokio::test]
    async fn test_membership_in_several_units() {
        let world = TestWorld::new();

        // PICKER reaches HARBOR through SALES only
        assert!(
            world
                .authorizer
                .authorize_warehouse(PICKER, HARBOR, "edit")
                .await
                .unwrap()
        );
        assert!(
            !world
                .authorizer
                .authorize_warehouse(CLERK, HARBOR, "view")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_superuser_without_grants() {
        let world = TestWorld::new();

        for action in WarehouseAction::ALL {
            let decision = world.authorizer.check_warehouse(ADMIN, OUTLET, action).await;
            decision.assert_allowed();
            assert!(decision.is_superuser_override());
        }
        assert!(world.cache.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_check_uses_cache() {
        let world = TestWorld::new();

        let first = world
            .authorizer
            .check_warehouse(CLERK, CENTRAL, WarehouseAction::View)
            .await;
        first.assert_fresh();
        let lookups = world.grants.lookup_count();

        let second = world
            .authorizer
            .check_warehouse(CLERK, CENTRAL, WarehouseAction::View)
            .await;
        assert!(second.is_cache_hit());
        assert_eq!(first.allowed, second.allowed);
        assert_eq!(world.grants.lookup_count(), lookups);
    }

    #[tokio::test]
    async fn test_found_but_denied_expires_first() {
        let world = TestWorld::new();

        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "edit").await.unwrap();
        world.authorizer.authorize_warehouse(CLERK, OUTLET, "edit").await.unwrap();
        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "view").await.unwrap();

        let ttl = |warehouse, action| {
            world
                .cache
                .ttl_remaining(DecisionKey::warehouse(CLERK, warehouse, action).as_str())
                .expect("decision is cached")
        };

        let found_but_denied = ttl(CENTRAL, WarehouseAction::Edit);
        let not_found = ttl(OUTLET, WarehouseAction::Edit);
        let granted = ttl(CENTRAL, WarehouseAction::View);

        assert!(found_but_denied < not_found);
        assert!(not_found < granted);
        assert!(found_but_denied.as_secs() <= DecisionTtl::DEFAULT_FOUND_BUT_DENIED_SECS);
    }

    #[tokio::test]
    async fn test_unknown_principal_is_denied() {
        let world = TestWorld::new();
        let stranger = PrincipalId::new(12345);

        assert!(
            !world
                .authorizer
                .authorize_warehouse(stranger, CENTRAL, "view")
                .await
                .unwrap()
        );
        assert_eq!(world.audit.denials().len(), 1);
    }

    #[tokio::test]
    async fn test_accessible_warehouses_filters_by_view() {
        let world = TestWorld::new();

        let visible = world
            .authorizer
            .accessible_warehouses(PICKER, &[CENTRAL, HARBOR, OUTLET])
            .await;
        assert_eq!(visible, vec![CENTRAL, HARBOR]);
    }
}
