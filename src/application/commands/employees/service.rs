use std::sync::Arc;

use crate::{
    application::{
        audit::AuditLogWriter,
        error::{ApplicationError, ApplicationResult},
        ports::{
            cache::{QueryCache, keys},
            ids::IdGenerator,
            time::Clock,
        },
    },
    domain::{
        employee::{Employee, EmployeeId, EmployeeNumber, EmployeeReadRepository},
        sick_leave::SickLeaveReadRepository,
        transaction::TransactionManager,
    },
};

/// Employee registry: create, edit, deactivate.
pub struct EmployeeCommandService {
    pub(super) employees: Arc<dyn EmployeeReadRepository>,
    pub(super) sick_leaves: Arc<dyn SickLeaveReadRepository>,
    pub(super) transactions: Arc<dyn TransactionManager>,
    pub(super) audit: Arc<AuditLogWriter>,
    pub(super) cache: Arc<dyn QueryCache>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
}

impl EmployeeCommandService {
    pub fn new(
        employees: Arc<dyn EmployeeReadRepository>,
        sick_leaves: Arc<dyn SickLeaveReadRepository>,
        transactions: Arc<dyn TransactionManager>,
        audit: Arc<AuditLogWriter>,
        cache: Arc<dyn QueryCache>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            employees,
            sick_leaves,
            transactions,
            audit,
            cache,
            clock,
            ids,
        }
    }

    pub(super) async fn load(&self, id: EmployeeId) -> ApplicationResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("employee not found"))
    }

    /// Fails when `number` belongs to an employee other than `owner`.
    pub(super) async fn ensure_number_available(
        &self,
        number: &EmployeeNumber,
        owner: Option<EmployeeId>,
    ) -> ApplicationResult<()> {
        match self.employees.find_by_employee_number(number).await? {
            Some(existing) if Some(existing.id) != owner => Err(ApplicationError::conflict(
                format!("employee number '{number}' already exists"),
            )),
            _ => Ok(()),
        }
    }

    /// Sick-leave views embed employee summaries, so both families are dropped.
    pub(super) fn invalidate(&self) {
        self.cache.invalidate_prefix(keys::EMPLOYEE_PREFIX);
        self.cache.invalidate_prefix(keys::SICK_LEAVE_PREFIX);
    }
}
