use crate::domain::errors::DomainError;

const CNT_EMPLOYEE_NUMBER: &str = "employees_employee_number_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_SICK_LEAVE_EMPLOYEE: &str = "sick_leaves_employee_id_fkey";
const CNT_SICK_LEAVE_CREATOR: &str = "sick_leaves_created_by_fkey";
const CNT_SICK_LEAVE_UPDATER: &str = "sick_leaves_updated_by_fkey";
const CNT_SICK_LEAVE_DATE_ORDER: &str = "sick_leaves_date_order_chk";
const CNT_SICK_LEAVE_DOCTOR_VISIT: &str = "sick_leaves_doctor_visit_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_EMPLOYEE_NUMBER => {
                        DomainError::Conflict("employee number already exists".into())
                    }
                    CNT_USER_EMAIL => DomainError::Conflict("email already exists".into()),
                    CNT_SICK_LEAVE_EMPLOYEE => DomainError::NotFound("employee not found".into()),
                    CNT_SICK_LEAVE_CREATOR | CNT_SICK_LEAVE_UPDATER => {
                        DomainError::NotFound("acting user not found".into())
                    }
                    CNT_SICK_LEAVE_DATE_ORDER => DomainError::Validation(
                        "start date must be before or equal to end date".into(),
                    ),
                    CNT_SICK_LEAVE_DOCTOR_VISIT => DomainError::Validation(
                        "doctor visit date must lie between start date and end date".into(),
                    ),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Escapes LIKE wildcards and wraps the term for a substring match.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
