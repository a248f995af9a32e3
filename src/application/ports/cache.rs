use std::time::Duration;

/// Short-lived query result cache.
///
/// Values are stored as JSON so a hit returns exactly what was put in. Implementations must be
/// safe to disable entirely: callers always fall back to the repository on a miss.
pub trait QueryCache: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn set(&self, key: &str, value: serde_json::Value, ttl: Duration);

    fn invalidate(&self, key: &str);

    /// Drops every entry whose key starts with `prefix`.
    fn invalidate_prefix(&self, prefix: &str);
}

/// Key layout shared by the query services and the invalidation paths.
pub mod keys {
    use uuid::Uuid;

    pub const SICK_LEAVE_PREFIX: &str = "sick_leaves:";
    pub const SICK_LEAVE_LIST_PREFIX: &str = "sick_leaves:list:";
    pub const EMPLOYEE_PREFIX: &str = "employees:";
    pub const EMPLOYEE_LIST_PREFIX: &str = "employees:list:";

    pub fn sick_leave_list(normalized: &str) -> String {
        format!("{SICK_LEAVE_LIST_PREFIX}{normalized}")
    }

    pub fn sick_leave_item(id: Uuid) -> String {
        format!("sick_leaves:item:{id}")
    }

    pub fn employee_list(normalized: &str) -> String {
        format!("{EMPLOYEE_LIST_PREFIX}{normalized}")
    }

    pub fn employee_item(id: Uuid, include_sick_leaves: bool) -> String {
        format!("employees:item:{id}:sickLeaves={include_sick_leaves}")
    }
}

/// Expiry applied to cached query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub list: std::time::Duration,
    pub item: std::time::Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            list: std::time::Duration::from_secs(15),
            item: std::time::Duration::from_secs(30),
        }
    }
}
