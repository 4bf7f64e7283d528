//! Stock audit sinks

use super::{AuditRecord, AuditSink};
use crate::utils::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Emits each record as a structured `tracing` event on the
/// `inventory_authz::audit` target.
///
/// Denials are logged at WARN, superuser overrides at INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait::async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<()> {
        let principal = record.principal.get();
        let target = record.target.to_string();
        let reason = record.reason.to_string();

        if record.is_denial() {
            warn!(
                target: "inventory_authz::audit",
                audit_id = %record.id,
                principal,
                resource = %target,
                action = %record.action,
                granted = false,
                reason = %reason,
                "Authorization denied: {} on {}", record.action, target
            );
        } else if record.is_superuser_override() {
            info!(
                target: "inventory_authz::audit",
                audit_id = %record.id,
                principal,
                resource = %target,
                action = %record.action,
                granted = true,
                reason = %reason,
                "Authorization granted by superuser override: {} on {}", record.action, target
            );
        } else {
            debug!(
                target: "inventory_authz::audit",
                audit_id = %record.id,
                principal,
                resource = %target,
                action = %record.action,
                granted = true,
                reason = %reason,
                "Authorization granted: {} on {}", record.action, target
            );
        }
        Ok(())
    }
}

/// Keeps records in memory for inspection
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    pub fn denials(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.is_denial())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

#[async_trait::async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Forwards every record to each inner sink.
///
/// All sinks are tried even if one fails; the first failure is returned.
#[derive(Default, Clone)]
pub struct FanoutAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl FanoutAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }

    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanoutAuditSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutAuditSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[async_trait::async_trait]
impl AuditSink for FanoutAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.record(record).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
