use crate::types::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Structural problem with the request itself (mismatched parallel
    /// arrays, wrong vector dimensionality, empty category list fed to the
    /// weight policy). The only variant that fails a whole request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No vector collection is registered for the category. Skippable
    /// per-term.
    #[error("No collection registered for category '{0}'")]
    UnknownCategory(Category),

    /// The vector index could not be queried or returned malformed data.
    /// Skippable per-term.
    #[error("Vector backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
