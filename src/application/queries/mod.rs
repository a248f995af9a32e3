mod cached;
pub mod audit;
pub mod employees;
pub mod sick_leaves;
pub mod users;

use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};

/// Upper bound for `limit` on list queries.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Every query needs `resource:read`; audit history is readable by admins only.
pub(crate) fn ensure_read_capability(
    actor: &AuthenticatedUser,
    resource: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, "read") {
        return Ok(());
    }
    Err(ApplicationError::forbidden(format!(
        "role {} may not read {resource}",
        actor.role
    )))
}

/// `None` lists everything; explicit limits are clamped to `1..=MAX_LIST_LIMIT`.
pub(crate) fn normalize_limit(limit: Option<u32>) -> Option<u32> {
    limit.map(|l| l.clamp(1, MAX_LIST_LIMIT))
}
