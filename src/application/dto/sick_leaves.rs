use crate::domain::sick_leave::{SickLeaveDetails, StatusCounts};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{employees::EmployeeSummaryDto, serde_time, users::UserSummaryDto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveDto {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub doctor_visit_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// `active`, `completed` or `cancelled`.
    pub status: String,
    /// Calendar days covered, both ends inclusive.
    pub days: i64,
    pub created_by_id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    pub updated_by_id: Option<i64>,
    #[serde(default, with = "serde_time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    pub employee: Option<EmployeeSummaryDto>,
    pub created_by: Option<UserSummaryDto>,
    pub updated_by: Option<UserSummaryDto>,
}

impl From<SickLeaveDetails> for SickLeaveDto {
    fn from(details: SickLeaveDetails) -> Self {
        let SickLeaveDetails {
            record,
            employee,
            created_by,
            updated_by,
        } = details;
        Self {
            id: record.id.into(),
            employee_id: record.employee_id.into(),
            start_date: record.period.start(),
            end_date: record.period.end(),
            doctor_visit_date: record.period.doctor_visit(),
            notes: record.notes.map(|n| n.as_str().to_string()),
            status: record.status.as_str().to_string(),
            days: record.period.days(),
            created_by_id: record.created_by.into(),
            created_at: record.created_at,
            updated_by_id: record.updated_by.map(Into::into),
            updated_at: record.updated_at,
            employee: employee.map(Into::into),
            created_by: created_by.map(Into::into),
            updated_by: updated_by.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountsDto {
    pub active: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub total: u64,
}

impl From<StatusCounts> for StatusCountsDto {
    fn from(counts: StatusCounts) -> Self {
        Self {
            active: counts.active,
            completed: counts.completed,
            cancelled: counts.cancelled,
            total: counts.total,
        }
    }
}

/// The filter as it was applied, echoed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveFilterView {
    pub employee_id: Option<Uuid>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub period: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveListMeta {
    /// Rows matching the filter, ignoring the limit.
    pub total: u64,
    /// Rows in `items`.
    pub count: usize,
    pub filter: SickLeaveFilterView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SickLeaveListDto {
    pub items: Vec<SickLeaveDto>,
    pub meta: SickLeaveListMeta,
    pub counts: StatusCountsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveMutationDto {
    pub message: String,
    pub sick_leave: SickLeaveDto,
}
