use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::sick_leave::value_objects::SickLeaveStatus;

/// Status changes reachable through a regular edit.
///
/// `active -> completed` and same-state edits are allowed. Cancellation only goes through the
/// cancel operation, and a completed record is never reopened.
pub struct UpdateTransitionSpec {
    from: SickLeaveStatus,
    to: SickLeaveStatus,
}

impl UpdateTransitionSpec {
    pub fn new(from: SickLeaveStatus, to: SickLeaveStatus) -> Self {
        Self { from, to }
    }

    pub fn is_satisfied(&self) -> bool {
        use SickLeaveStatus::{Active, Completed};
        self.from == self.to || matches!((self.from, self.to), (Active, Completed))
    }

    pub fn check(&self) -> DomainResult<()> {
        if self.is_satisfied() {
            return Ok(());
        }
        if self.to == SickLeaveStatus::Cancelled {
            return Err(DomainError::Validation(
                "sick leaves are cancelled through the cancel operation".into(),
            ));
        }
        Err(DomainError::Conflict(format!(
            "status cannot change from {} to {}",
            self.from, self.to
        )))
    }
}

/// Cancelled records are frozen: neither dates, notes nor status change through an edit.
pub struct EditableSpec {
    status: SickLeaveStatus,
}

impl EditableSpec {
    pub fn new(status: SickLeaveStatus) -> Self {
        Self { status }
    }

    pub fn is_satisfied(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn check(&self) -> DomainResult<()> {
        if self.is_satisfied() {
            Ok(())
        } else {
            Err(DomainError::Conflict(
                "cancelled sick leaves cannot be edited".into(),
            ))
        }
    }
}
