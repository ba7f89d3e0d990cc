use crate::types::DbId;

/// Domain-level errors surfaced by the registry and input validation.
///
/// The health engine itself never fails: empty snapshots and zero
/// denominators are defined behavior, not errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
