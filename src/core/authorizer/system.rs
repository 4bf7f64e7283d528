//! Authorizer construction

use crate::config::{AuthzConfig, CacheBackendKind, DecisionCacheConfig, Validate};
use crate::core::audit::{AuditRecord, AuditSink, AuditTarget, FanoutAuditSink, TracingAuditSink};
use crate::core::clock::{Clock, SystemClock};
use crate::core::decision::Decision;
use crate::core::decision_cache::{
    DecisionCache, MemoryDecisionCache, NoopDecisionCache, VerdictCache,
};
use crate::core::objects::ObjectResolver;
use crate::core::roles::RoleHierarchy;
use crate::core::types::PrincipalId;
use crate::core::warehouse::WarehouseResolver;
use crate::storage::{GrantStore, IdentityProvider, StockLocator};
use crate::utils::error::{AuthzError, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Main authorization engine
#[derive(Clone)]
pub struct Authorizer {
    pub(super) identity: Arc<dyn IdentityProvider>,
    pub(super) grants: Arc<dyn GrantStore>,
    pub(super) stock: Option<Arc<dyn StockLocator>>,
    pub(super) cache: VerdictCache,
    pub(super) warehouses: WarehouseResolver,
    pub(super) objects: ObjectResolver,
    pub(super) roles: Arc<RoleHierarchy>,
    pub(super) audit: Arc<dyn AuditSink>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) config: Arc<AuthzConfig>,
}

impl Authorizer {
    /// Start building an authorizer over the given collaborators
    pub fn builder(
        identity: Arc<dyn IdentityProvider>,
        grants: Arc<dyn GrantStore>,
    ) -> AuthorizerBuilder {
        AuthorizerBuilder::new(identity, grants)
    }

    pub fn config(&self) -> &AuthzConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn role_hierarchy(&self) -> &Arc<RoleHierarchy> {
        &self.roles
    }

    /// Hand the decision to the audit sink if it has to be recorded
    pub(super) async fn audit(
        &self,
        principal: PrincipalId,
        target: AuditTarget,
        action: &str,
        decision: &Decision,
    ) {
        let required = !decision.allowed || decision.is_superuser_override();
        if !required && !self.config.audit.record_grants {
            return;
        }

        let record = AuditRecord::new(principal, target, action, decision, self.clock.now());
        if let Err(e) = self.audit.record(&record).await {
            error!("Failed to write audit record {}: {}", record.id, e);
        }
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("roles", &self.roles)
            .field("stock", &self.stock.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Authorizer`]
pub struct AuthorizerBuilder {
    identity: Arc<dyn IdentityProvider>,
    grants: Arc<dyn GrantStore>,
    cache: Option<Arc<dyn DecisionCache>>,
    stock: Option<Arc<dyn StockLocator>>,
    audit: Option<Arc<dyn AuditSink>>,
    clock: Option<Arc<dyn Clock>>,
    roles: Option<Arc<RoleHierarchy>>,
    config: AuthzConfig,
}

impl AuthorizerBuilder {
    pub fn new(identity: Arc<dyn IdentityProvider>, grants: Arc<dyn GrantStore>) -> Self {
        Self {
            identity,
            grants,
            cache: None,
            stock: None,
            audit: None,
            clock: None,
            roles: None,
            config: AuthzConfig::default(),
        }
    }

    /// Cache backend; defaults to an in-memory cache sized by the config
    pub fn cache(mut self, cache: Arc<dyn DecisionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Enables the stock fallback for object checks
    pub fn stock(mut self, stock: Arc<dyn StockLocator>) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Audit sink; defaults to [`TracingAuditSink`]
    pub fn audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Share a role hierarchy snapshot with other authorizers
    pub fn roles(mut self, roles: Arc<RoleHierarchy>) -> Self {
        self.roles = Some(roles);
        self
    }

    pub fn config(mut self, config: AuthzConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Authorizer> {
        self.config.validate().map_err(AuthzError::Config)?;

        let backend: Arc<dyn DecisionCache> = if !self.config.cache.enabled {
            info!("Decision cache disabled");
            Arc::new(NoopDecisionCache)
        } else {
            match (self.cache, self.config.cache.backend) {
                (Some(cache), _) => cache,
                (None, CacheBackendKind::Memory) => {
                    Arc::new(MemoryDecisionCache::new(self.config.cache.max_entries))
                }
                (None, CacheBackendKind::Redis) => {
                    return Err(AuthzError::config(
                        "Redis cache backend configured but no cache supplied, build one with cache_from_config",
                    ));
                }
            }
        };
        let cache = VerdictCache::new(backend, self.config.cache.ttl.policy());

        let audit: Arc<dyn AuditSink> = match self.audit {
            Some(audit) => audit,
            None if self.config.audit.enabled => Arc::new(TracingAuditSink),
            None => Arc::new(FanoutAuditSink::default()),
        };

        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let warehouses =
            WarehouseResolver::new(self.identity.clone(), self.grants.clone(), cache.clone());
        let objects = ObjectResolver::new(
            self.identity.clone(),
            self.grants.clone(),
            cache.clone(),
            clock.clone(),
        );

        info!(
            "Authorizer ready (ttl granted={}s, found_but_denied={}s, not_found={}s)",
            cache.ttl().granted,
            cache.ttl().found_but_denied,
            cache.ttl().not_found
        );

        Ok(Authorizer {
            identity: self.identity,
            grants: self.grants,
            stock: self.stock,
            cache,
            warehouses,
            objects,
            roles: self.roles.unwrap_or_default(),
            audit,
            clock,
            config: Arc::new(self.config),
        })
    }
}

/// Build the cache backend described by `config`
pub async fn cache_from_config(config: &DecisionCacheConfig) -> Result<Arc<dyn DecisionCache>> {
    if !config.enabled {
        return Ok(Arc::new(NoopDecisionCache));
    }

    match config.backend {
        CacheBackendKind::Memory => Ok(Arc::new(MemoryDecisionCache::new(config.max_entries))),
        #[cfg(feature = "redis")]
        CacheBackendKind::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| AuthzError::config("Redis cache backend requires redis_url"))?;
            let cache =
                crate::core::decision_cache::RedisDecisionCache::connect(url, &config.key_prefix)
                    .await?;
            Ok(Arc::new(cache))
        }
        #[cfg(not(feature = "redis"))]
        CacheBackendKind::Redis => Err(AuthzError::config(
            "Redis cache backend requires the `redis` feature",
        )),
    }
}
