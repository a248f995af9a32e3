use super::EmployeeQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, EmployeeDto},
        error::{ApplicationError, ApplicationResult},
        ports::cache::keys,
        queries::{cached::cached, ensure_read_capability},
    },
    domain::employee::EmployeeId,
};
use uuid::Uuid;

pub struct GetEmployeeQuery {
    pub id: Uuid,
    /// Embeds every sick leave of the employee, newest start date first.
    pub include_sick_leaves: bool,
}

impl EmployeeQueryService {
    pub async fn get_employee(
        &self,
        actor: &AuthenticatedUser,
        query: GetEmployeeQuery,
    ) -> ApplicationResult<EmployeeDto> {
        ensure_read_capability(actor, "employees")?;
        let key = keys::employee_item(query.id, query.include_sick_leaves);
        cached(self.cache.as_ref(), &key, self.ttls.item, || async {
            let id = EmployeeId(query.id);
            let employee = self
                .employees
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("employee not found"))?;
            let dto = EmployeeDto::from(employee);
            if !query.include_sick_leaves {
                return Ok(dto);
            }
            let records = self.sick_leaves.list_by_employee(id).await?;
            Ok(dto.with_sick_leaves(records.into_iter().map(Into::into).collect()))
        })
        .await
    }
}
