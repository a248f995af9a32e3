// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, auth, employees, sick_leaves},
    middleware::rate_limit::login_rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Rate limiting keys on the peer address, so it needs `ConnectInfo` or forwarding headers.
/// In-process callers without either disable it.
pub fn build_router_with_rate_limiter(
    state: HttpState,
    allowed_origins: &[String],
    enable_rate_limiter: bool,
) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    let mut login = Router::new().route("/api/v1/auth/login", post(auth::login));
    if enable_rate_limiter {
        if let Some(limiter) = login_rate_limit_layer() {
            login = login.layer(limiter);
        } else {
            tracing::warn!("login rate limiter unavailable, continuing without it");
        }
    }

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(login)
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/sick-leave-records",
            get(sick_leaves::list_sick_leaves).post(sick_leaves::create_sick_leave),
        )
        .route(
            "/api/v1/sick-leave-records/{id}",
            get(sick_leaves::get_sick_leave)
                .put(sick_leaves::update_sick_leave)
                .delete(sick_leaves::cancel_sick_leave),
        )
        .route(
            "/api/v1/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/v1/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::deactivate_employee),
        )
        .route(
            "/api/v1/audit-logs",
            get(audit::list_audit_logs).post(audit::report_audit_event),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
