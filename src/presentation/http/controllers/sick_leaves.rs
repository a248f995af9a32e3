// src/presentation/http/controllers/sick_leaves.rs
use super::list_cache_control;
use crate::application::{
    commands::sick_leaves::{
        CancelSickLeaveCommand, CreateSickLeaveCommand, UpdateSickLeaveCommand,
    },
    dto::{SickLeaveDto, SickLeaveListDto, SickLeaveMutationDto},
    queries::sick_leaves::{GetSickLeaveQuery, ListSickLeavesQuery},
    validation::SickLeaveInput,
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

/// Body of create and update. Dates are `YYYY-MM-DD`; `status` is honoured on update and, for
/// seeding callers, on create.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SickLeaveRequest {
    pub employee_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub doctor_visit_date: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl From<SickLeaveRequest> for SickLeaveInput {
    fn from(value: SickLeaveRequest) -> Self {
        Self {
            employee_id: value.employee_id,
            start_date: value.start_date,
            end_date: value.end_date,
            doctor_visit_date: value.doctor_visit_date,
            notes: value.notes,
            status: value.status,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SickLeaveListParams {
    pub employee_id: Option<String>,
    /// `active`, `completed` or `cancelled`.
    pub status: Option<String>,
    /// Lower bound on the start date.
    pub start_date: Option<String>,
    /// Upper bound on the end date.
    pub end_date: Option<String>,
    /// `current`, `future`, `past` or `last30Days`.
    #[serde(alias = "zeitraum")]
    pub period: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/sick-leave-records",
    params(SickLeaveListParams),
    responses(
        (status = 200, description = "Matching records with global status counts.", body = SickLeaveListDto),
        (status = 400, description = "Malformed filter.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "SickLeaves"
)]
pub async fn list_sick_leaves(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<SickLeaveListParams>,
) -> HttpResult<([(header::HeaderName, String); 1], Json<SickLeaveListDto>)> {
    let query = ListSickLeavesQuery {
        employee_id: params.employee_id,
        status: params.status,
        start_date: params.start_date,
        end_date: params.end_date,
        period: params.period,
        search: params.search,
        limit: params.limit,
    };

    let list = state
        .services
        .sick_leave_queries
        .list_sick_leaves(&user, query)
        .await
        .into_http()?;

    let cache_control = list_cache_control(state.services.cache_ttls());
    Ok(([(header::CACHE_CONTROL, cache_control)], Json(list)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sick-leave-records/{id}",
    params(("id" = Uuid, Path, description = "Sick-leave id")),
    responses(
        (status = 200, description = "Record with resolved employee, creator and updater.", body = SickLeaveDto),
        (status = 404, description = "No such record.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "SickLeaves"
)]
pub async fn get_sick_leave(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
) -> HttpResult<Json<SickLeaveDto>> {
    state
        .services
        .sick_leave_queries
        .get_sick_leave(&user, GetSickLeaveQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/sick-leave-records",
    request_body = SickLeaveRequest,
    responses(
        (status = 201, description = "Record created.", body = SickLeaveMutationDto),
        (status = 400, description = "Field errors.", body = ErrorResponse),
        (status = 403, description = "Non-default status without seeding capability.", body = ErrorResponse),
        (status = 404, description = "Employee does not exist.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "SickLeaves"
)]
pub async fn create_sick_leave(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    meta: ClientMeta,
    Json(payload): Json<SickLeaveRequest>,
) -> HttpResult<(StatusCode, Json<SickLeaveMutationDto>)> {
    let command = CreateSickLeaveCommand {
        input: payload.into(),
        meta: meta.into_inner(),
    };

    let created = state
        .services
        .sick_leave_commands
        .create_sick_leave(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/sick-leave-records/{id}",
    params(("id" = Uuid, Path, description = "Sick-leave id")),
    request_body = SickLeaveRequest,
    responses(
        (status = 200, description = "Record updated.", body = SickLeaveMutationDto),
        (status = 400, description = "Field errors.", body = ErrorResponse),
        (status = 404, description = "Record or employee does not exist.", body = ErrorResponse),
        (status = 409, description = "Status transition not allowed.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "SickLeaves"
)]
pub async fn update_sick_leave(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    meta: ClientMeta,
    Json(payload): Json<SickLeaveRequest>,
) -> HttpResult<Json<SickLeaveMutationDto>> {
    let command = UpdateSickLeaveCommand {
        id,
        input: payload.into(),
        meta: meta.into_inner(),
    };

    state
        .services
        .sick_leave_commands
        .update_sick_leave(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/sick-leave-records/{id}",
    params(("id" = Uuid, Path, description = "Sick-leave id")),
    responses(
        (status = 200, description = "Record cancelled. The row is kept.", body = SickLeaveMutationDto),
        (status = 403, description = "Caller may not cancel.", body = ErrorResponse),
        (status = 404, description = "No such record.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "SickLeaves"
)]
pub async fn cancel_sick_leave(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<Uuid>,
    meta: ClientMeta,
) -> HttpResult<Json<SickLeaveMutationDto>> {
    let command = CancelSickLeaveCommand {
        id,
        meta: meta.into_inner(),
    };

    state
        .services
        .sick_leave_commands
        .cancel_sick_leave(&user, command)
        .await
        .into_http()
        .map(Json)
}
