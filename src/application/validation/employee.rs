use super::sick_leave::inner_message;
use crate::application::error::{ApplicationError, ApplicationResult, FieldErrors};
use crate::domain::employee::{EmployeeNumber, PersonName, Position};

/// Employee fields as submitted. On update a missing `employee_number` keeps the current one
/// and `is_active` is ignored.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub employee_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ValidatedEmployee {
    pub employee_number: Option<EmployeeNumber>,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub position: Option<Position>,
    /// Initial flag for a new employee. Defaults to `true` when omitted.
    pub is_active: bool,
}

pub fn validate_employee(
    input: &EmployeeInput,
    require_number: bool,
) -> ApplicationResult<ValidatedEmployee> {
    let mut errors = FieldErrors::new();

    let employee_number = match input.employee_number.as_deref() {
        None if !require_number => None,
        raw => match EmployeeNumber::new(raw.unwrap_or_default()) {
            Ok(number) => Some(number),
            Err(_) => {
                errors.add("employeeNumber", "is required");
                None
            }
        },
    };

    let mut name = |field: &str, raw: Option<&String>| {
        match PersonName::new(raw.cloned().unwrap_or_default()) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.add(field, inner_message(err));
                None
            }
        }
    };
    let first_name = name("firstName", input.first_name.as_ref());
    let last_name = name("lastName", input.last_name.as_ref());

    match (first_name, last_name) {
        (Some(first_name), Some(last_name)) if errors.is_empty() => Ok(ValidatedEmployee {
            employee_number,
            first_name,
            last_name,
            position: Position::parse(input.position.clone()),
            is_active: input.is_active.unwrap_or(true),
        }),
        _ => Err(ApplicationError::FieldErrors(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmployeeInput {
        EmployeeInput {
            employee_number: Some("P1001".into()),
            first_name: Some("Anna".into()),
            last_name: Some("Schmidt".into()),
            position: Some("  ".into()),
            is_active: None,
        }
    }

    #[test]
    fn defaults_active_and_drops_blank_position() {
        let validated = validate_employee(&input(), true).unwrap();
        assert!(validated.is_active);
        assert!(validated.position.is_none());
        assert_eq!(validated.employee_number.unwrap().as_str(), "P1001");
    }

    #[test]
    fn number_optional_on_update_only() {
        let mut raw = input();
        raw.employee_number = None;
        assert!(validate_employee(&raw, false).unwrap().employee_number.is_none());
        assert!(validate_employee(&raw, true).is_err());
    }

    #[test]
    fn blank_names_are_field_errors() {
        let mut raw = input();
        raw.first_name = Some(" ".into());
        raw.last_name = None;
        match validate_employee(&raw, true) {
            Err(ApplicationError::FieldErrors(errors)) => {
                assert!(errors.contains("firstName"));
                assert!(errors.contains("lastName"));
            }
            other => panic!("expected field errors, got {other:?}"),
        }
    }
}
