use crate::domain::employee::EmployeeId;
use crate::domain::errors::DomainResult;
use crate::domain::sick_leave::{
    entity::SickLeaveDetails, filter::SickLeaveListCriteria, value_objects::SickLeaveId,
};
use async_trait::async_trait;

/// Global per-status counts, independent of the list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct SickLeaveListing {
    pub items: Vec<SickLeaveDetails>,
    /// Rows matching the filter, ignoring the limit.
    pub total: u64,
    pub counts: StatusCounts,
}

#[async_trait]
pub trait SickLeaveReadRepository: Send + Sync {
    async fn find_by_id(&self, id: SickLeaveId) -> DomainResult<Option<SickLeaveDetails>>;

    /// Ordered by start date, newest first.
    async fn list(&self, criteria: &SickLeaveListCriteria) -> DomainResult<SickLeaveListing>;

    /// All records of one employee, newest start date first.
    async fn list_by_employee(&self, employee_id: EmployeeId)
    -> DomainResult<Vec<SickLeaveDetails>>;

    /// Records of the given employees whose status is `active`.
    async fn list_active_by_employees(
        &self,
        employee_ids: &[EmployeeId],
    ) -> DomainResult<Vec<SickLeaveDetails>>;
}
