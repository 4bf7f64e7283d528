//! Object permission integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::*;
    use crate::common::{DecisionAssertions, TestWorld};
    use chrono::Duration;
    use inventory_authz::{
        AuthzConfig, Clock, DecisionReason, GrantSubject, ObjectAction, ObjectGrant, ObjectRef,
        TimeWindow,
    };

    fn document() -> ObjectRef {
        ObjectRef::new("document", 5)
    }

    #[tokio::test]
    async fn test_expired_direct_grant_yields_to_unit_grant() {
        let world = TestWorld::new();

        let decision = world
            .authorizer
            .check_object(CLERK, &document(), ObjectAction::Edit)
            .await;
        decision.assert_allowed();
        assert_eq!(decision.reason, DecisionReason::GrantMatched(GrantSubject::Unit(OPS)));
    }

    #[tokio::test]
    async fn test_expired_grant_alone_denies_every_action() {
        let world = TestWorld::new();
        let report = ObjectRef::new("report", 1);
        let now = world.clock.now();
        world.grants.insert_object_grant(
            ObjectGrant::new(GrantSubject::Principal(AUDITOR), report.clone())
                .with_view(true)
                .with_edit(true)
                .with_delete(true)
                .with_window(TimeWindow::new(None, Some(now - Duration::seconds(1)))),
        );

        for action in ObjectAction::ALL {
            world
                .authorizer
                .check_object(AUDITOR, &report, action)
                .await
                .assert_denied();
        }
    }

    #[tokio::test]
    async fn test_grant_valid_for_another_hour() {
        let world = TestWorld::new();
        let report = ObjectRef::new("report", 2);
        let now = world.clock.now();
        world.grants.insert_object_grant(
            ObjectGrant::new(GrantSubject::Principal(AUDITOR), report.clone())
                .with_view(true)
                .with_window(TimeWindow::new(None, Some(now + Duration::hours(1)))),
        );

        assert!(world.authorizer.authorize_object(AUDITOR, &report, "view").await.unwrap());
        assert!(!world.authorizer.authorize_object(AUDITOR, &report, "delete").await.unwrap());
    }

    #[tokio::test]
    async fn test_grant_from_tomorrow() {
        let mut config = AuthzConfig::default();
        config.cache.enabled = false;
        let world = TestWorld::with_config(config);

        let tomorrow = world.clock.now() + Duration::days(1);
        let target = ObjectRef::new("product", 42);
        world.grants.insert_object_grant(
            ObjectGrant::new(GrantSubject::Principal(AUDITOR), target.clone())
                .with_view(true)
                .with_window(TimeWindow::new(Some(tomorrow), None)),
        );

        assert!(!world.authorizer.authorize_object(AUDITOR, &target, "view").await.unwrap());
        world.clock.set(tomorrow);
        assert!(world.authorizer.authorize_object(AUDITOR, &target, "view").await.unwrap());
    }

    #[tokio::test]
    async fn test_product_visible_through_stocked_warehouse() {
        let world = TestWorld::new();
        let product = ObjectRef::new("product", 42);

        // CLERK has no object grant but may view CENTRAL, which stocks it
        let decision = world
            .authorizer
            .check_object(CLERK, &product, ObjectAction::View)
            .await;
        decision.assert_allowed();
        assert_eq!(decision.reason, DecisionReason::StockFallback(CENTRAL));

        // Stocked only in OUTLET, which nobody in OPS may view
        assert!(
            !world
                .authorizer
                .authorize_object(CLERK, &ObjectRef::new("product", 43), "view")
                .await
                .unwrap()
        );

        // The fallback never extends beyond view
        assert!(!world.authorizer.authorize_object(CLERK, &product, "edit").await.unwrap());
    }

    #[tokio::test]
    async fn test_unit_grant_on_product() {
        let world = TestWorld::new();
        let product = ObjectRef::new("product", 42);

        assert!(world.authorizer.authorize_object(PICKER, &product, "edit").await.unwrap());
        assert!(!world.authorizer.authorize_object(CLERK, &product, "edit").await.unwrap());
    }

    #[tokio::test]
    async fn test_denials_carry_the_grant_that_was_found() {
        let world = TestWorld::new();

        world
            .authorizer
            .authorize_object(CLERK, &document(), "delete")
            .await
            .unwrap();

        let denials = world.audit.denials();
        assert_eq!(denials.len(), 1);
        assert_eq!(denials[0].action, "delete");
        assert_eq!(
            denials[0].reason,
            DecisionReason::GrantInsufficient(vec![
                GrantSubject::Principal(CLERK),
                GrantSubject::Unit(OPS)
            ])
        );
    }
}
