use super::{optional_date, required_date};
use crate::application::error::{ApplicationError, ApplicationResult, FieldErrors};
use crate::domain::employee::EmployeeId;
use crate::domain::errors::DomainError;
use crate::domain::sick_leave::{LeavePeriod, Notes, SickLeaveStatus};

/// Sick-leave fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct SickLeaveInput {
    pub employee_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub doctor_visit_date: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedSickLeave {
    pub employee_id: EmployeeId,
    pub period: LeavePeriod,
    pub notes: Option<Notes>,
    pub status: Option<SickLeaveStatus>,
}

/// Collects every field problem before failing. `require_status` is set for full updates.
pub fn validate_sick_leave(
    input: &SickLeaveInput,
    require_status: bool,
) -> ApplicationResult<ValidatedSickLeave> {
    let mut errors = FieldErrors::new();

    let employee_id = match input.employee_id.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("employeeId", "is required");
            None
        }
        Some(raw) => match raw.parse::<EmployeeId>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add("employeeId", "must be a valid UUID");
                None
            }
        },
    };

    let start = required_date(&mut errors, "startDate", input.start_date.as_deref());
    let end = required_date(&mut errors, "endDate", input.end_date.as_deref());
    let doctor_visit = optional_date(
        &mut errors,
        "doctorVisitDate",
        input.doctor_visit_date.as_deref(),
    );

    let notes = match Notes::parse(input.notes.clone()) {
        Ok(notes) => notes,
        Err(err) => {
            errors.add("notes", inner_message(err));
            None
        }
    };

    let status = match input.status.as_deref().map(str::trim) {
        None | Some("") => {
            if require_status {
                errors.add("status", "is required");
            }
            None
        }
        Some(raw) => match raw.parse::<SickLeaveStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.add("status", "must be one of active, completed, cancelled");
                None
            }
        },
    };

    let mut period = None;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            errors.add("endDate", LeavePeriod::DATE_ORDER_MESSAGE);
        } else if doctor_visit.is_some_and(|visit| visit < start || visit > end) {
            errors.add("doctorVisitDate", LeavePeriod::DOCTOR_VISIT_MESSAGE);
        } else {
            period = LeavePeriod::new(start, end, doctor_visit).ok();
        }
    }

    match (employee_id, period) {
        (Some(employee_id), Some(period)) if errors.is_empty() => Ok(ValidatedSickLeave {
            employee_id,
            period,
            notes,
            status,
        }),
        _ => {
            if errors.is_empty() {
                errors.add("endDate", LeavePeriod::DATE_ORDER_MESSAGE);
            }
            Err(ApplicationError::FieldErrors(errors))
        }
    }
}

pub(super) fn inner_message(err: DomainError) -> String {
    match err {
        DomainError::Validation(msg)
        | DomainError::Conflict(msg)
        | DomainError::NotFound(msg)
        | DomainError::Persistence(msg) => msg,
    }
}
