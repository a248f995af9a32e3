use crate::domain::errors::{DomainError, DomainResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

pub const NOTES_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SickLeaveId(pub Uuid);

impl From<Uuid> for SickLeaveId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<SickLeaveId> for Uuid {
    fn from(value: SickLeaveId) -> Self {
        value.0
    }
}

impl fmt::Display for SickLeaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SickLeaveStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl SickLeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SickLeaveStatus::Active => "active",
            SickLeaveStatus::Completed => "completed",
            SickLeaveStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SickLeaveStatus::Cancelled)
    }
}

impl fmt::Display for SickLeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SickLeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" | "aktiv" => Ok(SickLeaveStatus::Active),
            "completed" | "abgeschlossen" => Ok(SickLeaveStatus::Completed),
            "cancelled" | "storniert" => Ok(SickLeaveStatus::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown sick leave status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes(String);

impl Notes {
    /// Blank notes normalize to `None`.
    pub fn parse(value: Option<String>) -> DomainResult<Option<Self>> {
        let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        if value.chars().count() > NOTES_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "notes must not exceed {NOTES_MAX_CHARS} characters"
            )));
        }
        Ok(Some(Self(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The absence window of a sick-leave record.
///
/// Invariants: `start <= end`, and a doctor visit, when present, lies within `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePeriod {
    start: NaiveDate,
    end: NaiveDate,
    doctor_visit: Option<NaiveDate>,
}

impl LeavePeriod {
    pub const DATE_ORDER_MESSAGE: &'static str = "start date must be before or equal to end date";
    pub const DOCTOR_VISIT_MESSAGE: &'static str =
        "doctor visit date must lie between start date and end date";

    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        doctor_visit: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::Validation(Self::DATE_ORDER_MESSAGE.into()));
        }
        if let Some(visit) = doctor_visit {
            if visit < start || visit > end {
                return Err(DomainError::Validation(Self::DOCTOR_VISIT_MESSAGE.into()));
            }
        }
        Ok(Self {
            start,
            end,
            doctor_visit,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn doctor_visit(&self) -> Option<NaiveDate> {
        self.doctor_visit
    }

    /// Calendar days covered, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
