use super::AuditQueryService;
use crate::{
    application::{
        dto::{AuditLogDto, AuthenticatedUser, CursorPage},
        error::{ApplicationError, ApplicationResult},
        queries::ensure_read_capability,
    },
    domain::audit::{AuditLogCursor, AuditLogFilter, AuditTable},
};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// `limit == 0` asks for the default page size.
#[derive(Debug, Clone, Default)]
pub struct ListAuditLogsQuery {
    pub table_name: Option<String>,
    pub record_id: Option<Uuid>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    /// Newest first. `next_cursor` is set when more entries follow.
    pub async fn list_audit_logs(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        ensure_read_capability(actor, "audit")?;
        let limit = page_size(query.limit);
        let cursor = self.decode_cursor(query.cursor.as_deref())?;
        let filter = AuditLogFilter {
            table_name: query
                .table_name
                .as_deref()
                .map(str::parse::<AuditTable>)
                .transpose()?,
            record_id: query.record_id,
        };

        let mut entries = self.repo.list(&filter, cursor, limit + 1).await?;
        let next_cursor = if entries.len() > limit as usize {
            entries.truncate(limit as usize);
            entries
                .last()
                .map(|last| AuditLogCursor::new(last.created_at, last.id.0).encode())
        } else {
            None
        };

        let items = entries.into_iter().map(AuditLogDto::from).collect();
        Ok(CursorPage::new(items, next_cursor))
    }

    fn decode_cursor(&self, cursor: Option<&str>) -> ApplicationResult<Option<AuditLogCursor>> {
        cursor
            .map(AuditLogCursor::decode)
            .transpose()
            .map_err(ApplicationError::from)
    }
}

fn page_size(limit: u32) -> u32 {
    match limit {
        0 => DEFAULT_PAGE_SIZE,
        n => n.min(MAX_PAGE_SIZE),
    }
}
