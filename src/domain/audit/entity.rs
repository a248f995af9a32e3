// src/domain/audit/entity.rs
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuditEntryId(pub Uuid);

impl fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User-facing intent of a change. Deactivating an employee and cancelling a sick leave are
/// recorded as `Delete` although no row is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Insert => "INSERT",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(AuditAction::Insert),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(DomainError::Validation(format!(
                "unknown audit action '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditTable {
    #[serde(rename = "SickLeaveRecord")]
    SickLeave,
    #[serde(rename = "Employee")]
    Employee,
}

impl AuditTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditTable::SickLeave => "SickLeaveRecord",
            AuditTable::Employee => "Employee",
        }
    }
}

impl FromStr for AuditTable {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SickLeaveRecord" => Ok(AuditTable::SickLeave),
            "Employee" => Ok(AuditTable::Employee),
            other => Err(DomainError::Validation(format!(
                "unknown audit table '{other}'"
            ))),
        }
    }
}

/// Who performed a change. Stored as the user id, or `"system"` when no session existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditActor {
    User(UserId),
    System,
}

impl AuditActor {
    pub const SYSTEM_SENTINEL: &'static str = "system";

    pub fn from_session(user: Option<UserId>) -> Self {
        user.map_or(AuditActor::System, AuditActor::User)
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            AuditActor::User(id) => Some(*id),
            AuditActor::System => None,
        }
    }
}

impl fmt::Display for AuditActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditActor::User(id) => write!(f, "{id}"),
            AuditActor::System => f.write_str(Self::SYSTEM_SENTINEL),
        }
    }
}

impl FromStr for AuditActor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::SYSTEM_SENTINEL {
            return Ok(AuditActor::System);
        }
        let raw = s
            .parse::<i64>()
            .map_err(|_| DomainError::Validation(format!("invalid audit actor '{s}'")))?;
        Ok(AuditActor::User(UserId::new(raw)?))
    }
}

/// One row to append. `old_values`/`new_values` already hold serialized JSON; `None` stays NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub id: AuditEntryId,
    pub table_name: AuditTable,
    pub record_id: Uuid,
    pub action: AuditAction,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub actor: AuditActor,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub table_name: AuditTable,
    pub record_id: Uuid,
    pub action: AuditAction,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub actor: AuditActor,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NewAuditEntry> for AuditEntry {
    fn from(entry: NewAuditEntry) -> Self {
        Self {
            id: entry.id,
            table_name: entry.table_name,
            record_id: entry.record_id,
            action: entry.action,
            old_values: entry.old_values,
            new_values: entry.new_values,
            actor: entry.actor,
            user_agent: entry.user_agent,
            ip_address: entry.ip_address,
            created_at: entry.created_at,
        }
    }
}
