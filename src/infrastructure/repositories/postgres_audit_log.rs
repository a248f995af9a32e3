use super::map_sqlx;
use crate::domain::audit::{
    AuditEntry, AuditEntryId, AuditLogCursor, AuditLogFilter, AuditLogRepository, NewAuditEntry,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub(super) const INSERT_AUDIT_ENTRY: &str = "INSERT INTO audit_logs \
     (id, table_name, record_id, action, old_values, new_values, user_id, user_agent, ip_address, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditEntryRow {
    id: Uuid,
    table_name: String,
    record_id: Uuid,
    action: String,
    old_values: Option<String>,
    new_values: Option<String>,
    user_id: String,
    user_agent: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditEntryRow> for AuditEntry {
    type Error = DomainError;

    fn try_from(row: AuditEntryRow) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: AuditEntryId(row.id),
            table_name: row.table_name.parse()?,
            record_id: row.record_id,
            action: row.action.parse()?,
            old_values: row.old_values,
            new_values: row.new_values,
            actor: row.user_id.parse()?,
            user_agent: row.user_agent,
            ip_address: row.ip_address,
            created_at: row.created_at,
        })
    }
}

/// Binds an entry onto [`INSERT_AUDIT_ENTRY`].
pub(super) fn bind_entry(
    entry: NewAuditEntry,
) -> sqlx::query::Query<'static, Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(INSERT_AUDIT_ENTRY)
        .bind(entry.id.0)
        .bind(entry.table_name.as_str())
        .bind(entry.record_id)
        .bind(entry.action.as_str())
        .bind(entry.old_values)
        .bind(entry.new_values)
        .bind(entry.actor.to_string())
        .bind(entry.user_agent)
        .bind(entry.ip_address)
        .bind(entry.created_at)
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<()> {
        bind_entry(entry)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &AuditLogFilter,
        cursor: Option<AuditLogCursor>,
        limit: u32,
    ) -> DomainResult<Vec<AuditEntry>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, table_name, record_id, action, old_values, new_values, user_id, \
             user_agent, ip_address, created_at FROM audit_logs WHERE TRUE",
        );
        if let Some(table) = filter.table_name {
            builder.push(" AND table_name = ");
            builder.push_bind(table.as_str());
        }
        if let Some(record_id) = filter.record_id {
            builder.push(" AND record_id = ");
            builder.push_bind(record_id);
        }
        if let Some(cursor) = cursor {
            builder.push(" AND (created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<AuditEntryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}
