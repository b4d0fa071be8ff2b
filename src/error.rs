use super::*;

/// Failure of a repository operation.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// No spec row has the requested store-assigned key.
    #[error("could not read transformer spec {0}, it doesn't exist")]
    NotFound(ID<SpecRecord>),
    /// Untranslated failure of the underlying store.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failure reported by an execution context.
///
/// PostgreSQL reports constraint violations through its own error;
/// [`Memory`] reports the same violations through the named variants.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Postgres(#[from] PgErr),
    /// Hyperparameter insert under a spec key with no spec row.
    #[error("transformer spec {0} does not exist")]
    Orphan(ID<SpecRecord>),
    /// Second hyperparameter of the same name under one spec.
    #[error("transformer spec {spec} already has a hyperparameter named {name}")]
    Duplicate { spec: ID<SpecRecord>, name: String },
}
