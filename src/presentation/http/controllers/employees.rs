// src/presentation/http/controllers/employees.rs
use super::list_cache_control;
use crate::application::{
    commands::employees::{
        CreateEmployeeCommand, DeactivateEmployeeCommand, UpdateEmployeeCommand,
    },
    dto::{EmployeeDto, EmployeeListDto, EmployeeMutationDto},
    queries::employees::{GetEmployeeQuery, ListEmployeesQuery},
    validation::EmployeeInput,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientMeta};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::{StatusCode, header},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub employee_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    /// Honoured on create only. Deactivation goes through `DELETE`.
    pub is_active: Option<bool>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(value: EmployeeRequest) -> Self {
        Self {
            employee_number: value.employee_number,
            first_name: value.first_name,
            last_name: value.last_name,
            position: value.position,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeListParams {
    /// Defaults to `true`.
    pub active: Option<bool>,
    /// Matches names, employee number or position, case-insensitively.
    pub search: Option<String>,
    /// Embeds each employee's active sick leaves.
    pub include_sick_leaves: Option<bool>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeDetailParams {
    /// Embeds all sick leaves of the employee, newest first.
    pub include_sick_leaves: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeListParams),
    responses(
        (status = 200, description = "Employees ordered by last and first name.", body = EmployeeListDto),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<EmployeeListParams>,
) -> HttpResult<([(header::HeaderName, String); 1], Json<EmployeeListDto>)> {
    let query = ListEmployeesQuery {
        active: params.active,
        search: params.search,
        include_sick_leaves: params.include_sick_leaves.unwrap_or(false),
        limit: params.limit,
    };

    let list = state
        .services
        .employee_queries
        .list_employees(&user, query)
        .await
        .into_http()?;

    let cache_control = list_cache_control(state.services.cache_ttls());
    Ok(([(header::CACHE_CONTROL, cache_control)], Json(list)))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id"), EmployeeDetailParams),
    responses(
        (status = 200, description = "Employee.", body = EmployeeDto),
        (status = 404, description = "No such employee.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    Query(params): Query<EmployeeDetailParams>,
) -> HttpResult<Json<EmployeeDto>> {
    let query = GetEmployeeQuery {
        id,
        include_sick_leaves: params.include_sick_leaves.unwrap_or(false),
    };

    state
        .services
        .employee_queries
        .get_employee(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created.", body = EmployeeMutationDto),
        (status = 400, description = "Field errors.", body = ErrorResponse),
        (status = 403, description = "Caller may not create employees.", body = ErrorResponse),
        (status = 409, description = "Employee number already taken.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    meta: ClientMeta,
    Json(payload): Json<EmployeeRequest>,
) -> HttpResult<(StatusCode, Json<EmployeeMutationDto>)> {
    let command = CreateEmployeeCommand {
        input: payload.into(),
        meta: meta.into_inner(),
    };

    let created = state
        .services
        .employee_commands
        .create_employee(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated.", body = EmployeeMutationDto),
        (status = 400, description = "Field errors.", body = ErrorResponse),
        (status = 404, description = "No such employee.", body = ErrorResponse),
        (status = 409, description = "Employee number already taken.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    meta: ClientMeta,
    Json(payload): Json<EmployeeRequest>,
) -> HttpResult<Json<EmployeeMutationDto>> {
    let command = UpdateEmployeeCommand {
        id,
        input: payload.into(),
        meta: meta.into_inner(),
    };

    state
        .services
        .employee_commands
        .update_employee(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deactivated.", body = EmployeeMutationDto),
        (status = 403, description = "Caller may not deactivate employees.", body = ErrorResponse),
        (status = 404, description = "No such employee.", body = ErrorResponse),
        (status = 409, description = "Blocked by active sick leaves, listed in `details`.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Employees"
)]
pub async fn deactivate_employee(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    meta: ClientMeta,
) -> HttpResult<Json<EmployeeMutationDto>> {
    let command = DeactivateEmployeeCommand {
        id,
        meta: meta.into_inner(),
    };

    state
        .services
        .employee_commands
        .deactivate_employee(&user, command)
        .await
        .into_http()
        .map(Json)
}
