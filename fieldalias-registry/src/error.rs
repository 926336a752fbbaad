//! Error types for registry operations

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in registry operations.
///
/// Duplicate names and ignored input are not errors; they are reported through
/// the operation outcome enums.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Underlying storage failure
    #[error("storage error: {0}")]
    Store(#[from] fieldalias_store::StoreError),
}
