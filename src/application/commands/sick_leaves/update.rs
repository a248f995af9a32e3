use super::SickLeaveCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::{AuthenticatedUser, SickLeaveMutationDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
        validation::{SickLeaveInput, validate_sick_leave},
    },
    domain::{
        audit::{AuditAction, AuditTable},
        sick_leave::{SickLeaveEdit, SickLeaveId},
    },
};
use uuid::Uuid;

/// Full replacement of a record's editable fields, `status` included.
/// `employee_id` must name the record's current employee.
pub struct UpdateSickLeaveCommand {
    pub id: Uuid,
    pub input: SickLeaveInput,
    pub meta: Option<RequestMeta>,
}

impl SickLeaveCommandService {
    pub async fn update_sick_leave(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateSickLeaveCommand,
    ) -> ApplicationResult<SickLeaveMutationDto> {
        ensure_capability(actor, Resource::SickLeaves, "update")?;
        let validated = validate_sick_leave(&command.input, true)?;
        let id = SickLeaveId(command.id);

        let mut record = self.load(id).await?.record;
        if validated.employee_id != record.employee_id {
            let mut errors = FieldErrors::new();
            errors.add("employeeId", "cannot be changed after creation");
            return Err(ApplicationError::FieldErrors(errors));
        }

        let before = record.snapshot();
        let previous_status = record.status;
        record.apply(
            SickLeaveEdit {
                period: validated.period,
                notes: validated.notes,
                status: validated.status.unwrap_or(previous_status),
            },
            actor.id,
            self.clock.now(),
        )?;

        let audit = AuditRecord::new(AuditTable::SickLeave, id, AuditAction::Update)
            .old_values(&before)?
            .new_values(&record.snapshot())?
            .acting_user(Some(actor.id))
            .request_meta(command.meta);

        let mut tx = self.transactions.begin().await?;
        tx.update_sick_leave(&record).await?;
        self.audit
            .record_within_transaction(&mut *tx, audit)
            .await?;
        tx.commit().await?;

        self.invalidate(id);

        let message = if record.status == previous_status {
            "sick leave updated".to_string()
        } else {
            format!("sick leave updated (status: {})", record.status)
        };
        let updated = self.load(id).await?;
        Ok(SickLeaveMutationDto {
            message,
            sick_leave: updated.into(),
        })
    }
}
