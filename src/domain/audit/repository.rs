use crate::domain::audit::{
    cursor::AuditLogCursor,
    entity::{AuditEntry, AuditTable, NewAuditEntry},
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub table_name: Option<AuditTable>,
    pub record_id: Option<Uuid>,
}

/// Append-only audit storage. Writes inside a transaction go through
/// [`crate::domain::transaction::WriteTransaction`] instead.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Standalone append, committed on its own.
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<()>;

    /// Newest first, strictly older than `cursor` when given.
    async fn list(
        &self,
        filter: &AuditLogFilter,
        cursor: Option<AuditLogCursor>,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>>;
}
