use crate::domain::employee::{EmployeeId, EmployeeSummary};
use crate::domain::errors::DomainResult;
use crate::domain::sick_leave::{
    specifications::{EditableSpec, UpdateTransitionSpec},
    value_objects::{LeavePeriod, Notes, SickLeaveId, SickLeaveStatus},
};
use crate::domain::user::{UserId, UserSummary};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SickLeave {
    pub id: SickLeaveId,
    pub employee_id: EmployeeId,
    pub period: LeavePeriod,
    pub notes: Option<Notes>,
    pub status: SickLeaveStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated full replacement of the editable fields. The employee is fixed at creation.
#[derive(Debug, Clone)]
pub struct SickLeaveEdit {
    pub period: LeavePeriod,
    pub notes: Option<Notes>,
    pub status: SickLeaveStatus,
}

impl SickLeave {
    pub fn apply(
        &mut self,
        edit: SickLeaveEdit,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        EditableSpec::new(self.status).check()?;
        UpdateTransitionSpec::new(self.status, edit.status).check()?;

        self.period = edit.period;
        self.notes = edit.notes;
        self.status = edit.status;
        self.touch(actor, now);
        Ok(())
    }

    /// Moves the record to `cancelled` and returns the status it had before.
    /// Dates and notes are left untouched.
    pub fn cancel(&mut self, actor: UserId, now: DateTime<Utc>) -> SickLeaveStatus {
        let previous = self.status;
        self.status = SickLeaveStatus::Cancelled;
        self.touch(actor, now);
        previous
    }

    fn touch(&mut self, actor: UserId, now: DateTime<Utc>) {
        self.updated_by = Some(actor);
        self.updated_at = Some(now);
    }

    pub fn snapshot(&self) -> SickLeaveSnapshot {
        SickLeaveSnapshot::new(self.employee_id, &self.period, self.notes.as_ref(), self.status)
    }
}

#[derive(Debug, Clone)]
pub struct NewSickLeave {
    pub id: SickLeaveId,
    pub employee_id: EmployeeId,
    pub period: LeavePeriod,
    pub notes: Option<Notes>,
    pub status: SickLeaveStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewSickLeave {
    pub fn snapshot(&self) -> SickLeaveSnapshot {
        SickLeaveSnapshot::new(self.employee_id, &self.period, self.notes.as_ref(), self.status)
    }
}

/// Field values captured into the audit trail before and after a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveSnapshot {
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub doctor_visit_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: SickLeaveStatus,
}

impl SickLeaveSnapshot {
    fn new(
        employee_id: EmployeeId,
        period: &LeavePeriod,
        notes: Option<&Notes>,
        status: SickLeaveStatus,
    ) -> Self {
        Self {
            employee_id,
            start_date: period.start(),
            end_date: period.end(),
            doctor_visit_date: period.doctor_visit(),
            notes: notes.map(|n| n.as_str().to_string()),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub status: SickLeaveStatus,
}

/// A record together with the display fields of its employee, creator and last updater.
#[derive(Debug, Clone)]
pub struct SickLeaveDetails {
    pub record: SickLeave,
    pub employee: Option<EmployeeSummary>,
    pub created_by: Option<UserSummary>,
    pub updated_by: Option<UserSummary>,
}
