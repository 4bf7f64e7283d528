//! Configuration integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::*;
    use crate::common::TestWorld;
    use inventory_authz::{AuthzConfig, Config, DecisionKey, WarehouseAction};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG_YAML: &str = r#"
cache:
  backend: memory
  ttl:
    granted: 120
    found_but_denied: 30
    not_found: 60
stock_fallback:
  kinds: [product, kit]
audit:
  record_grants: true
"#;

    #[tokio::test]
    async fn test_file_config_drives_the_engine() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONFIG_YAML.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert!(config.authz.stock_fallback.applies_to("kit"));

        let world = TestWorld::with_config(config.authz);
        world.authorizer.authorize_warehouse(CLERK, CENTRAL, "view").await.unwrap();

        let ttl = world
            .cache
            .ttl_remaining(DecisionKey::warehouse(CLERK, CENTRAL, WarehouseAction::View).as_str())
            .unwrap();
        assert!(ttl.as_secs() <= 120);
        assert!(ttl.as_secs() > 60);
        assert_eq!(world.audit.len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_stock_fallback() {
        let config = AuthzConfig::from_lookup(|key| match key {
            "AUTHZ_STOCK_FALLBACK_ENABLED" => Some("false".to_string()),
            _ => None,
        })
        .unwrap();
        let world = TestWorld::with_config(config);

        assert!(
            !world
                .authorizer
                .authorize_object(
                    CLERK,
                    &inventory_authz::ObjectRef::new("product", 42),
                    "view"
                )
                .await
                .unwrap()
        );
    }

    #[test]
    fn test_rejected_config_is_reported() {
        let err = Config::from_yaml_str(
            r#"
cache:
  ttl:
    granted: 10
    found_but_denied: 30
    not_found: 20
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Cache config error"));
    }
}
