use std::sync::Arc;

use crate::{
    application::{
        audit::{AuditLogWriter, AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::AuthenticatedUser,
        error::{ApplicationResult, FieldErrors},
    },
    domain::audit::{AuditAction, AuditTable},
};
use uuid::Uuid;

/// A change reported by a client after it already happened.
#[derive(Debug, Clone, Default)]
pub struct ReportAuditEventCommand {
    pub table_name: Option<String>,
    pub record_id: Option<String>,
    pub action: Option<String>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub meta: Option<RequestMeta>,
}

pub struct AuditCommandService {
    writer: Arc<AuditLogWriter>,
}

impl AuditCommandService {
    pub fn new(writer: Arc<AuditLogWriter>) -> Self {
        Self { writer }
    }

    /// Validates the event, then records it outside any transaction. Storage failures are
    /// logged and never reach the caller.
    pub async fn report_event(
        &self,
        actor: &AuthenticatedUser,
        command: ReportAuditEventCommand,
    ) -> ApplicationResult<()> {
        let mut errors = FieldErrors::new();

        let table = match command.table_name.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("tableName", "is required");
                None
            }
            Some(raw) => raw
                .parse::<AuditTable>()
                .map_err(|_| errors.add("tableName", "must be SickLeaveRecord or Employee"))
                .ok(),
        };
        let record_id = match command.record_id.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("recordId", "is required");
                None
            }
            Some(raw) => raw
                .parse::<Uuid>()
                .map_err(|_| errors.add("recordId", "must be a valid UUID"))
                .ok(),
        };
        let action = match command.action.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("action", "is required");
                None
            }
            Some(raw) => raw
                .parse::<AuditAction>()
                .map_err(|_| errors.add("action", "must be INSERT, UPDATE or DELETE"))
                .ok(),
        };

        let (Some(table), Some(record_id), Some(action)) = (table, record_id, action) else {
            return errors.into_result(());
        };
        errors.into_result(())?;

        ensure_capability(actor, Resource::from(table), "update")?;

        let mut record = AuditRecord::new(table, record_id, action)
            .acting_user(Some(actor.id))
            .request_meta(command.meta);
        record.old_values = command.old_values;
        record.new_values = command.new_values;

        self.writer.record_best_effort(record).await;
        Ok(())
    }
}
