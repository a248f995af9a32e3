use crate::domain::audit::AuditEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

/// One audit row as stored: old/new values stay serialized JSON text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDto {
    pub id: Uuid,
    pub table_name: String,
    pub record_id: Uuid,
    pub action: String,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    /// Acting user id, or `"system"`.
    pub user_id: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditLogDto {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id.0,
            table_name: entry.table_name.as_str().to_string(),
            record_id: entry.record_id,
            action: entry.action.as_str().to_string(),
            old_values: entry.old_values,
            new_values: entry.new_values,
            user_id: entry.actor.to_string(),
            user_agent: entry.user_agent,
            ip_address: entry.ip_address,
            created_at: entry.created_at,
        }
    }
}
