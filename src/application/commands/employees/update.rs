use super::EmployeeCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::{AuthenticatedUser, EmployeeMutationDto},
        error::ApplicationResult,
        validation::{EmployeeInput, validate_employee},
    },
    domain::{
        audit::{AuditAction, AuditTable},
        employee::{EmployeeEdit, EmployeeId},
    },
};
use uuid::Uuid;

pub struct UpdateEmployeeCommand {
    pub id: Uuid,
    pub input: EmployeeInput,
    pub meta: Option<RequestMeta>,
}

impl EmployeeCommandService {
    pub async fn update_employee(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateEmployeeCommand,
    ) -> ApplicationResult<EmployeeMutationDto> {
        ensure_capability(actor, Resource::Employees, "update")?;
        let validated = validate_employee(&command.input, false)?;
        let id = EmployeeId(command.id);

        let mut employee = self.load(id).await?;
        if let Some(number) = &validated.employee_number {
            if number != &employee.employee_number {
                self.ensure_number_available(number, Some(id)).await?;
            }
        }

        let before = employee.snapshot();
        employee.apply(
            EmployeeEdit {
                employee_number: validated.employee_number,
                first_name: validated.first_name,
                last_name: validated.last_name,
                position: validated.position,
            },
            self.clock.now(),
        );

        let audit = AuditRecord::new(AuditTable::Employee, id, AuditAction::Update)
            .old_values(&before)?
            .new_values(&employee.snapshot())?
            .acting_user(Some(actor.id))
            .request_meta(command.meta);

        let mut tx = self.transactions.begin().await?;
        tx.update_employee(&employee).await?;
        self.audit.record_within_transaction(&mut *tx, audit).await?;
        tx.commit().await?;

        self.invalidate();

        Ok(EmployeeMutationDto {
            message: "employee updated".into(),
            employee: employee.into(),
        })
    }
}
