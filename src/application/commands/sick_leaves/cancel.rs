use super::SickLeaveCommandService;
use crate::{
    application::{
        audit::{AuditRecord, RequestMeta},
        commands::capability::{Resource, ensure_capability},
        dto::{AuthenticatedUser, SickLeaveMutationDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditAction, AuditTable},
        sick_leave::{SickLeaveId, StatusSnapshot},
    },
};
use uuid::Uuid;

pub struct CancelSickLeaveCommand {
    pub id: Uuid,
    pub meta: Option<RequestMeta>,
}

impl SickLeaveCommandService {
    /// Soft delete: the row stays, its status becomes `cancelled`. Repeating the call is
    /// allowed and appends another audit entry each time.
    pub async fn cancel_sick_leave(
        &self,
        actor: &AuthenticatedUser,
        command: CancelSickLeaveCommand,
    ) -> ApplicationResult<SickLeaveMutationDto> {
        ensure_capability(actor, Resource::SickLeaves, "cancel")?;
        let id = SickLeaveId(command.id);

        let mut record = self.load(id).await?.record;
        let previous = record.cancel(actor.id, self.clock.now());

        let audit = AuditRecord::new(AuditTable::SickLeave, id, AuditAction::Delete)
            .old_values(&StatusSnapshot { status: previous })?
            .new_values(&StatusSnapshot {
                status: record.status,
            })?
            .acting_user(Some(actor.id))
            .request_meta(command.meta);

        let mut tx = self.transactions.begin().await?;
        tx.update_sick_leave(&record).await?;
        self.audit
            .record_within_transaction(&mut *tx, audit)
            .await?;
        tx.commit().await?;

        self.invalidate(id);
        tracing::info!(sick_leave_id = %id, previous = %previous, "sick leave cancelled");

        let cancelled = self.load(id).await?;
        Ok(SickLeaveMutationDto {
            message: "sick leave cancelled".into(),
            sick_leave: cancelled.into(),
        })
    }
}
