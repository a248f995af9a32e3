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
        employee::{EmployeeId, EmployeeReadRepository},
        sick_leave::{SickLeaveDetails, SickLeaveId, SickLeaveReadRepository},
        transaction::TransactionManager,
    },
};

/// Owns the sick-leave lifecycle: create, edit, cancel.
pub struct SickLeaveCommandService {
    pub(super) sick_leaves: Arc<dyn SickLeaveReadRepository>,
    pub(super) employees: Arc<dyn EmployeeReadRepository>,
    pub(super) transactions: Arc<dyn TransactionManager>,
    pub(super) audit: Arc<AuditLogWriter>,
    pub(super) cache: Arc<dyn QueryCache>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
}

impl SickLeaveCommandService {
    pub fn new(
        sick_leaves: Arc<dyn SickLeaveReadRepository>,
        employees: Arc<dyn EmployeeReadRepository>,
        transactions: Arc<dyn TransactionManager>,
        audit: Arc<AuditLogWriter>,
        cache: Arc<dyn QueryCache>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            sick_leaves,
            employees,
            transactions,
            audit,
            cache,
            clock,
            ids,
        }
    }

    pub(super) async fn load(&self, id: SickLeaveId) -> ApplicationResult<SickLeaveDetails> {
        self.sick_leaves
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("sick leave not found"))
    }

    pub(super) async fn ensure_employee_exists(&self, id: EmployeeId) -> ApplicationResult<()> {
        match self.employees.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::not_found("employee not found")),
        }
    }

    /// Employee views embed sick leaves, so their entries go too.
    pub(super) fn invalidate(&self, id: SickLeaveId) {
        self.cache.invalidate_prefix(keys::SICK_LEAVE_LIST_PREFIX);
        self.cache.invalidate(&keys::sick_leave_item(id.into()));
        self.cache.invalidate_prefix(keys::EMPLOYEE_PREFIX);
    }
}
