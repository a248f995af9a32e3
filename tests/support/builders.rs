// tests/support/builders.rs
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use sickleave_core::application::validation::{EmployeeInput, SickLeaveInput};
use sickleave_core::domain::employee::{
    Employee, EmployeeId, EmployeeNumber, PersonName, Position,
};
use sickleave_core::domain::sick_leave::{
    LeavePeriod, Notes, SickLeave, SickLeaveId, SickLeaveStatus,
};
use sickleave_core::domain::user::UserId;

use super::mocks::{ADMIN_ID, FIXED_NOW};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub struct EmployeeBuilder {
    id: Uuid,
    number: String,
    first_name: String,
    last_name: String,
    position: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl EmployeeBuilder {
    pub fn new(number: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            first_name: "Anna".into(),
            last_name: "Schmidt".into(),
            position: None,
            is_active: true,
            created_at: *FIXED_NOW - Duration::days(100),
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn position(mut self, position: &str) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Employee {
        Employee {
            id: EmployeeId(self.id),
            employee_number: EmployeeNumber::new(self.number).unwrap(),
            first_name: PersonName::new(self.first_name).unwrap(),
            last_name: PersonName::new(self.last_name).unwrap(),
            position: Position::parse(self.position),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

pub struct SickLeaveBuilder {
    id: Uuid,
    employee_id: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
    doctor_visit: Option<NaiveDate>,
    notes: Option<String>,
    status: SickLeaveStatus,
    created_by: i64,
    created_at: DateTime<Utc>,
}

impl SickLeaveBuilder {
    pub fn new(employee_id: EmployeeId, start: &str, end: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            start: date(start),
            end: date(end),
            doctor_visit: None,
            notes: None,
            status: SickLeaveStatus::Active,
            created_by: ADMIN_ID,
            created_at: *FIXED_NOW - Duration::days(1),
        }
    }

    pub fn doctor_visit(mut self, visit: &str) -> Self {
        self.doctor_visit = Some(date(visit));
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn status(mut self, status: SickLeaveStatus) -> Self {
        self.status = status;
        self
    }

    pub fn created_by(mut self, user: i64) -> Self {
        self.created_by = user;
        self
    }

    pub fn build(self) -> SickLeave {
        SickLeave {
            id: SickLeaveId(self.id),
            employee_id: self.employee_id,
            period: LeavePeriod::new(self.start, self.end, self.doctor_visit).unwrap(),
            notes: Notes::parse(self.notes).unwrap(),
            status: self.status,
            created_by: UserId(self.created_by),
            created_at: self.created_at,
            updated_by: None,
            updated_at: None,
        }
    }
}

pub fn sick_leave_input(employee_id: EmployeeId, start: &str, end: &str) -> SickLeaveInput {
    SickLeaveInput {
        employee_id: Some(employee_id.to_string()),
        start_date: Some(start.into()),
        end_date: Some(end.into()),
        ..Default::default()
    }
}

pub fn employee_input(number: &str, first: &str, last: &str) -> EmployeeInput {
    EmployeeInput {
        employee_number: Some(number.into()),
        first_name: Some(first.into()),
        last_name: Some(last.into()),
        ..Default::default()
    }
}
