// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod auth;
pub mod employees;
pub mod sick_leaves;

use crate::application::ports::cache::CacheTtls;

/// Private caching for list responses, as long as the server keeps the list cached.
pub(crate) fn list_cache_control(ttls: CacheTtls) -> String {
    format!("private, max-age={}", ttls.list.as_secs())
}
