mod writer;

pub use writer::{AuditLogWriter, AuditRecord, RequestMeta};
