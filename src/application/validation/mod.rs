//! Boundary validation: raw request fields in, typed values or a field error map out.
mod employee;
mod sick_leave;

pub use employee::{EmployeeInput, ValidatedEmployee, validate_employee};
pub use sick_leave::{SickLeaveInput, ValidatedSickLeave, validate_sick_leave};

use crate::application::error::FieldErrors;
use chrono::NaiveDate;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a required `YYYY-MM-DD` field, recording a message under `field` on failure.
fn required_date(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => {
            errors.add(field, "is required");
            None
        }
        Some(raw) => parse_date(errors, field, raw),
    }
}

fn optional_date(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|raw| parse_date(errors, field, raw))
}

fn parse_date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields; the wire format does not.
    let well_formed = raw.len() == 10
        && raw
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    match well_formed
        .then(|| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
        .flatten()
    {
        Some(date) => Some(date),
        None => {
            errors.add(field, "must be a valid date in YYYY-MM-DD format");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_zero_padded_and_real() {
        let mut errors = FieldErrors::new();
        assert!(parse_date(&mut errors, "a", "2025-03-01").is_some());
        assert!(parse_date(&mut errors, "b", "2025-3-1").is_none());
        assert!(parse_date(&mut errors, "c", "2025-02-30").is_none());
        assert!(errors.contains("b") && errors.contains("c") && !errors.contains("a"));
    }

    #[test]
    fn blank_required_date_is_missing() {
        let mut errors = FieldErrors::new();
        assert!(required_date(&mut errors, "startDate", Some("  ")).is_none());
        assert_eq!(errors.get("startDate").unwrap(), ["is required"]);
    }
}
