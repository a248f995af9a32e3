use super::EmployeeCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::{AuthenticatedUser, EmployeeMutationDto, SickLeaveDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditTable},
        employee::EmployeeId,
    },
};
use uuid::Uuid;

pub struct DeactivateEmployeeCommand {
    pub id: Uuid,
    pub meta: Option<RequestMeta>,
}

impl EmployeeCommandService {
    /// Soft delete. Refused while the employee still has `active` sick leaves; the conflict
    /// payload lists them under `activeSickLeaves`.
    pub async fn deactivate_employee(
        &self,
        actor: &AuthenticatedUser,
        command: DeactivateEmployeeCommand,
    ) -> ApplicationResult<EmployeeMutationDto> {
        ensure_capability(actor, Resource::Employees, "deactivate")?;
        let id = EmployeeId(command.id);
        let mut employee = self.load(id).await?;

        let blocking = self.sick_leaves.list_active_by_employees(&[id]).await?;
        if !blocking.is_empty() {
            let count = blocking.len();
            let records: Vec<SickLeaveDto> = blocking.into_iter().map(Into::into).collect();
            let details = serde_json::json!({
                "activeSickLeaves": records,
                "count": count,
            });
            return Err(ApplicationError::conflict_with(
                "employee has active sick leaves and cannot be deactivated",
                details,
            ));
        }

        let before = employee.snapshot();
        employee.deactivate(self.clock.now());

        let audit = AuditRecord::new(AuditTable::Employee, id, AuditAction::Delete)
            .old_values(&before)?
            .new_values(&employee.snapshot())?
            .acting_user(Some(actor.id))
            .request_meta(command.meta);

        let mut tx = self.transactions.begin().await?;
        tx.update_employee(&employee).await?;
        self.audit.record_within_transaction(&mut *tx, audit).await?;
        tx.commit().await?;

        self.invalidate();
        tracing::info!(employee_id = %id, "employee deactivated");

        Ok(EmployeeMutationDto {
            message: "employee deactivated".into(),
            employee: employee.into(),
        })
    }
}
