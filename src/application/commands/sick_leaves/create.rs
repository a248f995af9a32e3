use super::SickLeaveCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::{AuthenticatedUser, SickLeaveMutationDto},
        error::ApplicationResult,
        validation::{SickLeaveInput, validate_sick_leave},
    },
    domain::{
        audit::{AuditAction, AuditTable},
        sick_leave::{NewSickLeave, SickLeaveId, SickLeaveStatus},
    },
};

pub struct CreateSickLeaveCommand {
    pub input: SickLeaveInput,
    pub meta: Option<RequestMeta>,
}

impl SickLeaveCommandService {
    pub async fn create_sick_leave(
        &self,
        actor: &AuthenticatedUser,
        command: CreateSickLeaveCommand,
    ) -> ApplicationResult<SickLeaveMutationDto> {
        ensure_capability(actor, Resource::SickLeaves, "create")?;
        let validated = validate_sick_leave(&command.input, false)?;

        // Only seeding callers may start a record in anything but `active`.
        let status = match validated.status {
            Some(status) if status != SickLeaveStatus::Active => {
                ensure_capability(actor, Resource::SickLeaves, "seed")?;
                status
            }
            _ => SickLeaveStatus::Active,
        };

        self.ensure_employee_exists(validated.employee_id).await?;

        let record = NewSickLeave {
            id: SickLeaveId(self.ids.next_id()),
            employee_id: validated.employee_id,
            period: validated.period,
            notes: validated.notes,
            status,
            created_by: actor.id,
            created_at: self.clock.now(),
        };

        let audit = AuditRecord::new(AuditTable::SickLeave, record.id, AuditAction::Insert)
            .new_values(&record.snapshot())?
            .acting_user(Some(actor.id))
            .request_meta(command.meta);

        let mut tx = self.transactions.begin().await?;
        tx.insert_sick_leave(&record).await?;
        self.audit
            .record_within_transaction(&mut *tx, audit)
            .await?;
        tx.commit().await?;

        self.invalidate(record.id);
        tracing::info!(sick_leave_id = %record.id, employee_id = %record.employee_id, "sick leave created");

        let created = self.load(record.id).await?;
        Ok(SickLeaveMutationDto {
            message: "sick leave created".into(),
            sick_leave: created.into(),
        })
    }
}
