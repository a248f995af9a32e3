// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_audit_log;
mod postgres_employee;
mod postgres_sick_leave;
mod postgres_user;
mod transaction;

pub use error::{like_pattern, map_sqlx};
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_employee::PostgresEmployeeRepository;
pub use postgres_sick_leave::PostgresSickLeaveRepository;
pub use postgres_user::PostgresUserRepository;
pub use transaction::{PostgresTransactionManager, PostgresWriteTransaction};
