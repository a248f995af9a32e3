use crate::domain::employee::value_objects::{EmployeeId, EmployeeNumber, PersonName, Position};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: EmployeeId,
    pub employee_number: EmployeeNumber,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub position: Option<Position>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The editable fields of an employee, already validated.
///
/// The active flag is not among them: only `deactivate` clears it.
#[derive(Debug, Clone)]
pub struct EmployeeEdit {
    pub employee_number: Option<EmployeeNumber>,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub position: Option<Position>,
}

impl Employee {
    /// Full replace of the editable fields. A missing employee number keeps the current one.
    pub fn apply(&mut self, edit: EmployeeEdit, now: DateTime<Utc>) {
        if let Some(number) = edit.employee_number {
            self.employee_number = number;
        }
        self.first_name = edit.first_name;
        self.last_name = edit.last_name;
        self.position = edit.position;
        self.updated_at = Some(now);
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = Some(now);
    }

    pub fn snapshot(&self) -> EmployeeSnapshot {
        EmployeeSnapshot {
            employee_number: self.employee_number.to_string(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            position: self.position.as_ref().map(|p| p.as_str().to_string()),
            is_active: self.is_active,
        }
    }

    pub fn summary(&self) -> EmployeeSummary {
        EmployeeSummary {
            id: self.id,
            employee_number: self.employee_number.to_string(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            position: self.position.as_ref().map(|p| p.as_str().to_string()),
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub id: EmployeeId,
    pub employee_number: EmployeeNumber,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub position: Option<Position>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewEmployee {
    pub fn snapshot(&self) -> EmployeeSnapshot {
        EmployeeSnapshot {
            employee_number: self.employee_number.to_string(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            position: self.position.as_ref().map(|p| p.as_str().to_string()),
            is_active: self.is_active,
        }
    }
}

impl From<NewEmployee> for Employee {
    fn from(new: NewEmployee) -> Self {
        Self {
            id: new.id,
            employee_number: new.employee_number,
            first_name: new.first_name,
            last_name: new.last_name,
            position: new.position,
            is_active: new.is_active,
            created_at: new.created_at,
            updated_at: None,
        }
    }
}

/// Field values captured into the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSnapshot {
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub is_active: bool,
}

/// Display fields of the employee a sick-leave record belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub is_active: bool,
}
