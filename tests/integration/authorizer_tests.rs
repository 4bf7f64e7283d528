//! End-to-end authorizer tests: invalidation, administration and
//! concurrent use

#[cfg(test)]
mod tests {
    use crate::common::fixtures::*;
    use crate::common::{DecisionAssertions, TestWorld};
    use inventory_authz::{
        AuditTarget, AuthzConfig, AuthzError, DecisionKey, GrantSubject, ObjectAction,
        ObjectGrant, ObjectRef, WarehouseAction, WarehouseGrant,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_invalid_action_is_the_only_error() {
        let world = TestWorld::new();

        let err = world
            .authorizer
            .authorize_warehouse(CLERK, CENTRAL, "delete")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::InvalidAction { .. }));

        let err = world
            .authorizer
            .authorize_object(CLERK, &ObjectRef::new("document", 5), "manage_stock")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::InvalidAction { .. }));

        assert!(world.cache.is_empty());
        assert!(world.audit.is_empty());
    }

    #[tokio::test]
    async fn test_revoked_warehouse_grant_takes_effect_immediately() {
        let world = TestWorld::new();
        let admin = world.admin();

        assert!(world.authorizer.authorize_warehouse(PICKER, CENTRAL, "view").await.unwrap());
        assert!(world.authorizer.authorize_warehouse(CLERK, CENTRAL, "view").await.unwrap());

        admin.remove_warehouse_grant(OPS, CENTRAL).await.unwrap();

        world
            .authorizer
            .check_warehouse(PICKER, CENTRAL, WarehouseAction::View)
            .await
            .assert_denied();
        world
            .authorizer
            .check_warehouse(CLERK, CENTRAL, WarehouseAction::View)
            .await
            .assert_denied();
    }

    #[tokio::test]
    async fn test_new_warehouse_grant_replaces_cached_denial() {
        let world = TestWorld::new();
        let admin = world.admin();

        assert!(!world.authorizer.authorize_warehouse(CLERK, OUTLET, "edit").await.unwrap());

        admin
            .put_warehouse_grant(WarehouseGrant::new(OUTLET, OPS).with_edit(true))
            .await
            .unwrap();

        assert!(world.authorizer.authorize_warehouse(CLERK, OUTLET, "edit").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalidation_only_touches_affected_keys() {
        let world = TestWorld::new();

        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "view").await.unwrap();
        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "edit").await.unwrap();
        world.authorizer.authorize_warehouse(PICKER, HARBOR, "view").await.unwrap();
        assert_eq!(world.cache.len(), 3);

        let deleted = world
            .authorizer
            .invalidate_warehouse_grant_cache(OPS, CENTRAL)
            .await;
        // Two members of OPS, three actions each
        assert_eq!(deleted, 6);
        assert_eq!(world.cache.len(), 1);
        assert!(
            world
                .cache
                .ttl_remaining(DecisionKey::warehouse(PICKER, HARBOR, WarehouseAction::View).as_str())
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_unit_object_grant_invalidation() {
        let world = TestWorld::new();
        let admin = world.admin();
        let document = ObjectRef::new("document", 5);

        assert!(world.authorizer.authorize_object(PICKER, &document, "edit").await.unwrap());

        admin
            .put_object_grant(
                ObjectGrant::new(GrantSubject::Unit(OPS), document.clone()).with_view(true),
            )
            .await
            .unwrap();

        assert!(!world.authorizer.authorize_object(PICKER, &document, "edit").await.unwrap());
        assert!(world.authorizer.authorize_object(PICKER, &document, "view").await.unwrap());
    }

    #[tokio::test]
    async fn test_direct_object_grant_invalidation() {
        let world = TestWorld::new();
        let report = ObjectRef::new("report", 9);

        for action in ObjectAction::ALL {
            world.authorizer.check_object(AUDITOR, &report, action).await;
        }
        assert_eq!(world.cache.len(), 3);

        let deleted = world
            .authorizer
            .invalidate_object_grant_cache(GrantSubject::Principal(AUDITOR), &report)
            .await;
        assert_eq!(deleted, 3);
        assert!(world.cache.is_empty());
    }

    #[tokio::test]
    async fn test_expired_grant_review() {
        let world = TestWorld::new();
        let admin = world.admin();

        let expired = admin.expired_object_grants().await.unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].subject, GrantSubject::Principal(CLERK));

        assert_eq!(admin.purge_expired_object_grants().await.unwrap(), 1);
        assert!(admin.expired_object_grants().await.unwrap().is_empty());

        // The unit grant still lets CLERK view the document
        assert!(
            world
                .authorizer
                .authorize_object(CLERK, &ObjectRef::new("document", 5), "view")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_audit_trail() {
        let world = TestWorld::new();

        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "view").await.unwrap();
        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "edit").await.unwrap();
        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "edit").await.unwrap();
        world.authorizer.authorize_warehouse(ADMIN, OUTLET, "edit").await.unwrap();

        // Two denials (one from cache) and one override; the grant is not recorded
        let records = world.audit.records();
        assert_eq!(records.len(), 3);
        assert_eq!(world.audit.denials().len(), 2);
        assert!(records[2].is_superuser_override());
        assert_eq!(records[2].target, AuditTarget::Warehouse(OUTLET));
    }

    #[tokio::test]
    async fn test_recording_grants() {
        let mut config = AuthzConfig::default();
        config.audit.record_grants = true;
        let world = TestWorld::with_config(config);

        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "view").await.unwrap();
        assert_eq!(world.audit.len(), 1);
        assert!(world.audit.records()[0].allowed);
    }

    #[tokio::test]
    async fn test_disabled_cache_gives_same_verdicts() {
        let mut config = AuthzConfig::default();
        config.cache.enabled = false;
        let uncached = TestWorld::with_config(config);
        let cached = TestWorld::new();

        for principal in [CLERK, PICKER, AUDITOR, ADMIN] {
            for warehouse in [CENTRAL, HARBOR, OUTLET] {
                for action in WarehouseAction::ALL {
                    let a = cached.authorizer.check_warehouse(principal, warehouse, action).await;
                    let b = uncached.authorizer.check_warehouse(principal, warehouse, action).await;
                    assert_eq!(a.allowed, b.allowed);
                }
            }
        }
        assert!(uncached.cache.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_checks_agree() {
        let world = Arc::new(TestWorld::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let world = Arc::clone(&world);
            handles.push(tokio::spawn(async move {
                let principal = if i % 2 == 0 { CLERK } else { PICKER };
                world
                    .authorizer
                    .authorize_warehouse(principal, CENTRAL, "view")
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(world.cache.len(), 2);
    }

    #[tokio::test]
    async fn test_store_outage_fails_closed() {
        let world = TestWorld::new();
        world.grants.set_offline(true);

        world
            .authorizer
            .check_warehouse(CLERK, CENTRAL, WarehouseAction::View)
            .await
            .assert_denied();

        world.grants.set_offline(false);
        world.cache.clear();
        world
            .authorizer
            .check_warehouse(CLERK, CENTRAL, WarehouseAction::View)
            .await
            .assert_allowed();
    }
}
