//! Audit trail of authorization decisions
//!
//! Every denial and every superuser override is handed to an [`AuditSink`]
//! together with the principal, target, action and the grant that matched or
//! was missing.

mod record;
mod sinks;

pub use record::{AuditRecord, AuditTarget};
pub use sinks::{FanoutAuditSink, MemoryAuditSink, TracingAuditSink};

use crate::utils::error::Result;

/// Append-only receiver of audit records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, record: &AuditRecord) -> Result<()>;
}
