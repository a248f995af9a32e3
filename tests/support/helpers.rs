// tests/support/helpers.rs
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use sickleave_core::application::{
    dto::AuthenticatedUser,
    ports::{
        cache::{CacheTtls, QueryCache},
        security::{PasswordHasher, TokenManager},
    },
    services::{ApplicationDependencies, ApplicationServices},
};
use sickleave_core::domain::user::Role;
use sickleave_core::infrastructure::{
    cache::InMemoryQueryCache,
    security::{Argon2PasswordHasher, BiscuitTokenManager},
};
use sickleave_core::presentation::http::{
    routes::build_router_with_rate_limiter, state::HttpState,
};

use super::mocks::{
    ADMIN_ID, DummyTokenManager, InMemoryStore, ManualClock, PlainPasswordHasher, STAFF_ID,
    SequentialIds, authenticated,
};

pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: InMemoryStore,
    pub cache: Arc<InMemoryQueryCache>,
    pub clock: Arc<ManualClock>,
}

/// Services over an in-memory store seeded with the admin and staff accounts.
pub fn test_app() -> TestApp {
    build(
        InMemoryStore::with_default_users(),
        Arc::new(PlainPasswordHasher),
        Arc::new(DummyTokenManager),
    )
}

/// Real Argon2 hashing and biscuit tokens, no users yet.
pub fn test_app_with_real_security() -> TestApp {
    build(
        InMemoryStore::new(),
        Arc::new(Argon2PasswordHasher),
        Arc::new(BiscuitTokenManager::ephemeral(Duration::from_secs(3600))),
    )
}

fn build(
    store: InMemoryStore,
    password_hasher: Arc<dyn PasswordHasher>,
    token_manager: Arc<dyn TokenManager>,
) -> TestApp {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(InMemoryQueryCache::new(clock.clone()));
    let cache_port: Arc<dyn QueryCache> = cache.clone();

    let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
        user_repo: Arc::new(store.clone()),
        employee_repo: Arc::new(store.clone()),
        sick_leave_repo: Arc::new(store.clone()),
        audit_log_repo: Arc::new(store.clone()),
        transactions: Arc::new(store.clone()),
        password_hasher,
        token_manager,
        cache: cache_port,
        clock: clock.clone(),
        ids: Arc::new(SequentialIds::default()),
        cache_ttls: CacheTtls::default(),
    }));

    TestApp {
        services,
        store,
        cache,
        clock,
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
        };
        build_router_with_rate_limiter(state, &[], false)
    }
}

pub fn admin() -> AuthenticatedUser {
    authenticated(ADMIN_ID, "admin@example.com", Role::Admin)
}

pub fn staff() -> AuthenticatedUser {
    authenticated(STAFF_ID, "staff@example.com", Role::Staff)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Sends one request through the router. `body` is sent as JSON when present.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    send_with_headers(router, method, uri, token, body, &[]).await
}

pub async fn send_with_headers(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
    extra_headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    for (name, value) in extra_headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
