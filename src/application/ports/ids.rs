use uuid::Uuid;

/// Source of identifiers for new sick leaves, employees and audit entries.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}
