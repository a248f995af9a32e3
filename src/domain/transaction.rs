//! Unit of work for mutations that must commit together with their audit entry.
use crate::domain::audit::NewAuditEntry;
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::errors::DomainResult;
use crate::domain::sick_leave::{NewSickLeave, SickLeave};
use async_trait::async_trait;

/// An open write transaction. Dropping it without [`WriteTransaction::commit`] rolls back.
#[async_trait]
pub trait WriteTransaction: Send {
    async fn insert_sick_leave(&mut self, record: &NewSickLeave) -> DomainResult<()>;

    async fn update_sick_leave(&mut self, record: &SickLeave) -> DomainResult<()>;

    async fn insert_employee(&mut self, employee: &NewEmployee) -> DomainResult<()>;

    async fn update_employee(&mut self, employee: &Employee) -> DomainResult<()>;

    async fn insert_audit_entry(&mut self, entry: NewAuditEntry) -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
}

#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn WriteTransaction>>;
}
