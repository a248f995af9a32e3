pub mod cursor;
pub mod entity;
pub mod repository;

pub use cursor::AuditLogCursor;
pub use entity::{AuditAction, AuditActor, AuditEntry, AuditEntryId, AuditTable, NewAuditEntry};
pub use repository::{AuditLogFilter, AuditLogRepository};
