// src/error.rs

use crate::store::StoreError;
use crate::workflow::WorkflowError;
use thiserror::Error;

/// Error type returned by the lifecycle services in this crate.
///
/// Validation failures are raised synchronously, before any store call is
/// attempted. Store failures are always carried as values; nothing in the
/// core panics on a failed remote operation.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: WorkflowError,
  },
}

pub type CoreResult<T, E = CoreError> = std::result::Result<T, E>;
