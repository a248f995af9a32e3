use crate::domain::employee::{Employee, EmployeeSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{serde_time, sick_leaves::SickLeaveDto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub is_active: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "serde_time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Present only when sick leaves were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sick_leaves: Option<Vec<SickLeaveDto>>,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.into(),
            employee_number: employee.employee_number.into(),
            first_name: employee.first_name.to_string(),
            last_name: employee.last_name.to_string(),
            position: employee.position.map(|p| p.as_str().to_string()),
            is_active: employee.is_active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
            sick_leaves: None,
        }
    }
}

impl EmployeeDto {
    pub fn with_sick_leaves(mut self, sick_leaves: Vec<SickLeaveDto>) -> Self {
        self.sick_leaves = Some(sick_leaves);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummaryDto {
    pub id: Uuid,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub is_active: bool,
}

impl From<EmployeeSummary> for EmployeeSummaryDto {
    fn from(summary: EmployeeSummary) -> Self {
        Self {
            id: summary.id.into(),
            employee_number: summary.employee_number,
            first_name: summary.first_name,
            last_name: summary.last_name,
            position: summary.position,
            is_active: summary.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListFilterView {
    pub active: bool,
    pub search: Option<String>,
    pub include_sick_leaves: bool,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListMeta {
    pub total: u64,
    pub count: usize,
    pub filter: EmployeeListFilterView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListDto {
    pub items: Vec<EmployeeDto>,
    pub meta: EmployeeListMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeMutationDto {
    pub message: String,
    pub employee: EmployeeDto,
}
