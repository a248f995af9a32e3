use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::audit::AuditTable;

/// Resources guarded by the command services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Resource {
    SickLeaves,
    Employees,
}

impl Resource {
    fn as_str(self) -> &'static str {
        match self {
            Resource::SickLeaves => "sick_leaves",
            Resource::Employees => "employees",
        }
    }
}

impl From<AuditTable> for Resource {
    fn from(table: AuditTable) -> Self {
        match table {
            AuditTable::SickLeave => Resource::SickLeaves,
            AuditTable::Employee => Resource::Employees,
        }
    }
}

/// Rejects the caller with `Forbidden` unless its token grants `resource:action`.
pub(super) fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: Resource,
    action: &str,
) -> ApplicationResult<()> {
    let resource = resource.as_str();
    if actor.has_capability(resource, action) {
        return Ok(());
    }
    tracing::debug!(user_id = %actor.id, role = %actor.role, resource, action, "capability denied");
    Err(ApplicationError::forbidden(format!(
        "role {} may not {action} {resource}",
        actor.role
    )))
}
