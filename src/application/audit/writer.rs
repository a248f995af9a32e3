use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{ids::IdGenerator, time::Clock},
    },
    domain::{
        audit::{AuditAction, AuditActor, AuditEntryId, AuditLogRepository, AuditTable, NewAuditEntry},
        transaction::WriteTransaction,
        user::UserId,
    },
};

/// Client details attached to audit entries. Each field is `None` when the header was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// One change to be written to the audit trail.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub table: AuditTable,
    pub record_id: Uuid,
    pub action: AuditAction,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub actor: AuditActor,
    pub meta: Option<RequestMeta>,
}

impl AuditRecord {
    pub fn new(table: AuditTable, record_id: impl Into<Uuid>, action: AuditAction) -> Self {
        Self {
            table,
            record_id: record_id.into(),
            action,
            old_values: None,
            new_values: None,
            actor: AuditActor::System,
            meta: None,
        }
    }

    pub fn old_values(mut self, values: &impl Serialize) -> ApplicationResult<Self> {
        self.old_values = Some(to_json(values)?);
        Ok(self)
    }

    pub fn new_values(mut self, values: &impl Serialize) -> ApplicationResult<Self> {
        self.new_values = Some(to_json(values)?);
        Ok(self)
    }

    /// Acting user of the current session; `None` records the system sentinel.
    pub fn acting_user(mut self, user: Option<UserId>) -> Self {
        self.actor = AuditActor::from_session(user);
        self
    }

    pub fn request_meta(mut self, meta: Option<RequestMeta>) -> Self {
        self.meta = meta;
        self
    }
}

fn to_json(values: &impl Serialize) -> ApplicationResult<serde_json::Value> {
    serde_json::to_value(values)
        .map_err(|err| ApplicationError::infrastructure(format!("audit serialization: {err}")))
}

/// JSON `null` and absence are both stored as NULL, never as the text `"null"`.
fn serialize_values(values: Option<serde_json::Value>) -> Option<String> {
    values.filter(|v| !v.is_null()).map(|v| v.to_string())
}

pub struct AuditLogWriter {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl AuditLogWriter {
    pub fn new(
        repo: Arc<dyn AuditLogRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { repo, clock, ids }
    }

    fn entry(&self, record: AuditRecord) -> NewAuditEntry {
        let meta = record.meta.unwrap_or_default();
        NewAuditEntry {
            id: AuditEntryId(self.ids.next_id()),
            table_name: record.table,
            record_id: record.record_id,
            action: record.action,
            old_values: serialize_values(record.old_values),
            new_values: serialize_values(record.new_values),
            actor: record.actor,
            user_agent: meta.user_agent,
            ip_address: meta.ip_address,
            created_at: self.clock.now(),
        }
    }

    /// Writes inside the caller's transaction. A failure aborts the whole unit of work.
    pub async fn record_within_transaction(
        &self,
        tx: &mut dyn WriteTransaction,
        record: AuditRecord,
    ) -> ApplicationResult<()> {
        tx.insert_audit_entry(self.entry(record)).await?;
        Ok(())
    }

    /// Standalone write. Failures are logged and swallowed.
    pub async fn record_best_effort(&self, record: AuditRecord) {
        let table = record.table;
        let record_id = record.record_id;
        if let Err(err) = self.repo.insert(self.entry(record)).await {
            tracing::warn!(
                error = %err,
                table = table.as_str(),
                %record_id,
                "failed to write audit log entry"
            );
        }
    }
}
