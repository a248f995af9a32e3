// src/presentation/http/openapi.rs
use crate::presentation::http::controllers::{audit, auth, employees, sick_leaves};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::profile,
        sick_leaves::list_sick_leaves,
        sick_leaves::get_sick_leave,
        sick_leaves::create_sick_leave,
        sick_leaves::update_sick_leave,
        sick_leaves::cancel_sick_leave,
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::deactivate_employee,
        audit::list_audit_logs,
        audit::report_audit_event,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            auth::LoginRequest,
            sick_leaves::SickLeaveRequest,
            employees::EmployeeRequest,
            audit::ReportAuditEventRequest,
            crate::application::dto::LoginResultDto,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::UserSummaryDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::SickLeaveDto,
            crate::application::dto::SickLeaveListDto,
            crate::application::dto::SickLeaveListMeta,
            crate::application::dto::SickLeaveFilterView,
            crate::application::dto::SickLeaveMutationDto,
            crate::application::dto::StatusCountsDto,
            crate::application::dto::EmployeeDto,
            crate::application::dto::EmployeeSummaryDto,
            crate::application::dto::EmployeeListDto,
            crate::application::dto::EmployeeListMeta,
            crate::application::dto::EmployeeListFilterView,
            crate::application::dto::EmployeeMutationDto,
            crate::application::dto::AuditLogDto
        )
    ),
    tags(
        (name = "Auth", description = "Login and caller profile"),
        (name = "SickLeaves", description = "Sick-leave records and their lifecycle"),
        (name = "Employees", description = "Employee registry"),
        (name = "Audit", description = "Audit trail of changes"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Sick Leave API",
        description = "Sick-leave tracking backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// Swagger UI at `/docs`, the raw document at `/openapi.json`.
pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}
