use crate::domain::employee::EmployeeId;
use crate::domain::errors::DomainError;
use crate::domain::sick_leave::value_objects::SickLeaveStatus;
use chrono::{Days, NaiveDate};
use std::str::FromStr;

/// Inclusive calendar bounds on one date column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Coarse time buckets relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePeriod {
    /// start <= today <= end
    Current,
    /// start > today
    Future,
    /// end < today
    Past,
    /// start >= today - 30 days
    Last30Days,
}

impl RelativePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativePeriod::Current => "current",
            RelativePeriod::Future => "future",
            RelativePeriod::Past => "past",
            RelativePeriod::Last30Days => "last30Days",
        }
    }

    /// Narrows the start/end bounds for `today`. Only the bounds a bucket
    /// speaks about are replaced; the other stays as the caller set it.
    pub fn apply(&self, today: NaiveDate, start: &mut DateBounds, end: &mut DateBounds) {
        match self {
            RelativePeriod::Current => {
                *start = DateBounds {
                    min: None,
                    max: Some(today),
                };
                *end = DateBounds {
                    min: Some(today),
                    max: None,
                };
            }
            RelativePeriod::Future => {
                *start = DateBounds {
                    min: today.checked_add_days(Days::new(1)),
                    max: None,
                };
            }
            RelativePeriod::Past => {
                *end = DateBounds {
                    min: None,
                    max: today.checked_sub_days(Days::new(1)),
                };
            }
            RelativePeriod::Last30Days => {
                *start = DateBounds {
                    min: today.checked_sub_days(Days::new(30)),
                    max: None,
                };
            }
        }
    }
}

impl FromStr for RelativePeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "current" | "aktuell" => Ok(RelativePeriod::Current),
            "future" | "zukuenftig" => Ok(RelativePeriod::Future),
            "past" | "vergangen" => Ok(RelativePeriod::Past),
            "last30Days" | "letzte30" => Ok(RelativePeriod::Last30Days),
            other => Err(DomainError::Validation(format!(
                "unknown period '{other}'"
            ))),
        }
    }
}

/// Resolved filter for listing sick leaves. Built at the boundary; repositories only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SickLeaveListCriteria {
    pub employee_id: Option<EmployeeId>,
    pub status: Option<SickLeaveStatus>,
    pub start: DateBounds,
    pub end: DateBounds,
    /// Case-insensitive match on notes, employee name or employee number.
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl SickLeaveListCriteria {
    /// Deterministic key over the resolved filter: `name=value` pairs sorted by name.
    pub fn cache_key(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = self.employee_id {
            params.push(("employeeId", id.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(min) = self.start.min {
            params.push(("startMin", min.to_string()));
        }
        if let Some(max) = self.start.max {
            params.push(("startMax", max.to_string()));
        }
        if let Some(min) = self.end.min {
            params.push(("endMin", min.to_string()));
        }
        if let Some(max) = self.end.max {
            params.push(("endMax", max.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.to_lowercase()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params.sort_by(|a, b| a.0.cmp(b.0));
        params
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
