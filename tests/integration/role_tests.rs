//! Role inheritance integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::*;
    use crate::common::{DecisionAssertions, TestWorld};
    use inventory_authz::{Capability, DecisionReason, RoleEdge, RoleName};

    #[tokio::test]
    async fn test_capabilities_flow_down_the_chain() {
        let world = TestWorld::new();

        // inventory_clerk -> warehouse_manager -> inventory_manager
        assert!(world.authorizer.authorize(CLERK, "can_view_inventory").await);
        assert!(world.authorizer.authorize(CLERK, "can_edit_inventory").await);
        assert!(world.authorizer.authorize(CLERK, "can_approve_order").await);
        assert!(!world.authorizer.authorize(CLERK, "can_view_reports").await);
    }

    #[tokio::test]
    async fn test_area_check() {
        let world = TestWorld::new();

        assert!(world.authorizer.authorize_area(CLERK, "order", "create").await);
        assert!(!world.authorizer.authorize_area(CLERK, "order", "delete").await);
        assert!(world.authorizer.authorize_area(AUDITOR, "reports", "view").await);
    }

    #[tokio::test]
    async fn test_reason_names_the_role() {
        let world = TestWorld::new();

        let decision = world
            .authorizer
            .check_capability(CLERK, &Capability::new("can_create_order"))
            .await;
        decision.assert_allowed();
        assert_eq!(
            decision.reason,
            DecisionReason::RoleCapability(RoleName::new("inventory_manager"))
        );

        let direct = world
            .authorizer
            .check_capability(AUDITOR, &Capability::new("can_view_reports"))
            .await;
        assert_eq!(direct.reason, DecisionReason::CapabilityAssigned);
    }

    #[tokio::test]
    async fn test_effective_roles_include_ancestors() {
        let world = TestWorld::new();

        let roles = world.authorizer.effective_roles(CLERK).await.unwrap();
        assert_eq!(roles.len(), 3);
        assert!(roles.contains(&RoleName::new("inventory_manager")));

        assert!(world.authorizer.effective_roles(PICKER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_effective_capabilities() {
        let world = TestWorld::new();

        let capabilities = world.authorizer.effective_capabilities(CLERK).await.unwrap();
        assert_eq!(capabilities.len(), 4);
        assert!(capabilities.contains(&Capability::new("can_edit_inventory")));
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        let world = TestWorld::new();
        world
            .grants
            .add_role_edge(RoleEdge::new("inventory_clerk", "inventory_manager"));
        assert!(world.authorizer.reload_role_hierarchy().await);

        let roles = world.authorizer.effective_roles(CLERK).await.unwrap();
        assert_eq!(roles.len(), 3);
        assert!(!world.authorizer.authorize(CLERK, "can_view_reports").await);
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_edges() {
        let world = TestWorld::new();
        assert!(!world.authorizer.authorize(CLERK, "can_view_reports").await);

        world.grants.add_role_capability(
            RoleName::new("report_reader"),
            Capability::new("can_view_reports"),
        );
        world
            .grants
            .add_role_edge(RoleEdge::new("report_reader", "inventory_manager"));

        // The loaded graph is kept until reloaded
        assert!(!world.authorizer.authorize(CLERK, "can_view_reports").await);
        assert!(world.authorizer.reload_role_hierarchy().await);
        assert!(world.authorizer.authorize(CLERK, "can_view_reports").await);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_graph() {
        let world = TestWorld::new();
        assert!(world.authorizer.authorize(CLERK, "can_approve_order").await);

        world.grants.set_offline(true);
        assert!(!world.authorizer.reload_role_hierarchy().await);
        world.grants.set_offline(false);

        assert!(world.authorizer.role_hierarchy().is_loaded());
        assert!(world.authorizer.authorize(CLERK, "can_approve_order").await);
    }

    #[tokio::test]
    async fn test_superuser_holds_every_capability() {
        let world = TestWorld::new();

        let decision = world
            .authorizer
            .check_capability(ADMIN, &Capability::new("can_do_anything"))
            .await;
        decision.assert_allowed();
        assert!(decision.is_superuser_override());
        assert_eq!(world.audit.len(), 1);
    }
}
