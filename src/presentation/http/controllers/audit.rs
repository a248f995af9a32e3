use crate::application::{
    commands::audit::ReportAuditEventCommand,
    dto::{AuditLogDto, CursorPage},
    queries::audit::ListAuditLogsQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, ClientMeta};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query, http::StatusCode};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAuditParams {
    /// `SickLeaveRecord` or `Employee`.
    pub table_name: Option<String>,
    pub record_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// A change the client already applied and wants on the audit trail.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportAuditEventRequest {
    pub table_name: Option<String>,
    pub record_id: Option<String>,
    /// `INSERT`, `UPDATE` or `DELETE`.
    pub action: Option<String>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    params(ListAuditParams),
    responses(
        (status = 200, description = "Audit entries, newest first.", body = CursorPage<AuditLogDto>),
        (status = 400, description = "Malformed cursor or table name.", body = ErrorResponse),
        (status = 403, description = "Caller may not read the audit trail.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<CursorPage<AuditLogDto>>> {
    let query = ListAuditLogsQuery {
        table_name: params.table_name,
        record_id: params.record_id,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .audit_queries
        .list_audit_logs(&actor, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/audit-logs",
    request_body = ReportAuditEventRequest,
    responses(
        (status = 202, description = "Accepted. Storage failures are logged, not reported."),
        (status = 400, description = "Field errors.", body = ErrorResponse),
        (status = 403, description = "Caller may not modify the referenced table.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn report_audit_event(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    meta: ClientMeta,
    Json(payload): Json<ReportAuditEventRequest>,
) -> HttpResult<StatusCode> {
    let command = ReportAuditEventCommand {
        table_name: payload.table_name,
        record_id: payload.record_id,
        action: payload.action,
        old_values: payload.old_values,
        new_values: payload.new_values,
        meta: meta.into_inner(),
    };

    state
        .services
        .audit_commands
        .report_event(&actor, command)
        .await
        .into_http()?;

    Ok(StatusCode::ACCEPTED)
}
