use super::EmployeeCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::{AuthenticatedUser, EmployeeDto, EmployeeMutationDto},
        error::{ApplicationError, ApplicationResult},
        validation::{EmployeeInput, validate_employee},
    },
    domain::{
        audit::{AuditAction, AuditTable},
        employee::{Employee, EmployeeId, NewEmployee},
    },
};

pub struct CreateEmployeeCommand {
    pub input: EmployeeInput,
    pub meta: Option<RequestMeta>,
}

impl EmployeeCommandService {
    pub async fn create_employee(
        &self,
        actor: &AuthenticatedUser,
        command: CreateEmployeeCommand,
    ) -> ApplicationResult<EmployeeMutationDto> {
        ensure_capability(actor, Resource::Employees, "create")?;
        let validated = validate_employee(&command.input, true)?;
        let employee_number = validated
            .employee_number
            .ok_or_else(|| ApplicationError::validation("employee number is required"))?;

        self.ensure_number_available(&employee_number, None).await?;

        let new_employee = NewEmployee {
            id: EmployeeId(self.ids.next_id()),
            employee_number,
            first_name: validated.first_name,
            last_name: validated.last_name,
            position: validated.position,
            is_active: validated.is_active,
            created_at: self.clock.now(),
        };

        let audit = AuditRecord::new(AuditTable::Employee, new_employee.id, AuditAction::Insert)
            .new_values(&new_employee.snapshot())?
            .acting_user(Some(actor.id))
            .request_meta(command.meta);

        let mut tx = self.transactions.begin().await?;
        tx.insert_employee(&new_employee).await?;
        self.audit.record_within_transaction(&mut *tx, audit).await?;
        tx.commit().await?;

        self.invalidate();
        tracing::info!(employee_id = %new_employee.id, "employee created");

        let employee = Employee::from(new_employee);
        Ok(EmployeeMutationDto {
            message: "employee created".into(),
            employee: EmployeeDto::from(employee),
        })
    }
}
