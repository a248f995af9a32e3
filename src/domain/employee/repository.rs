use crate::domain::employee::{
    entity::Employee,
    value_objects::{EmployeeId, EmployeeNumber},
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct EmployeeListCriteria {
    pub active: bool,
    /// Case-insensitive match on first name, last name, employee number or position.
    pub search: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct EmployeeListing {
    pub items: Vec<Employee>,
    pub total: u64,
}

#[async_trait]
pub trait EmployeeReadRepository: Send + Sync {
    async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Option<Employee>>;

    async fn find_by_employee_number(
        &self,
        number: &EmployeeNumber,
    ) -> DomainResult<Option<Employee>>;

    /// Ordered by last name, then first name.
    async fn list(&self, criteria: &EmployeeListCriteria) -> DomainResult<EmployeeListing>;
}
