//! Business logic for the four boundary operations.
//!
//! Service functions are pure: they take a request's parameters plus a
//! `CatalogReader` and return results or a `ServiceError`, so that the HTTP
//! routes stay thin wrappers.

use thiserror::Error;

pub mod combination;
pub mod compare;
pub mod coverage;
pub mod filter;
pub mod search;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request was malformed: missing fields, bad enum values, negative
    /// price bounds or empty names.
    #[error("validation error: {0}")]
    Validation(String),
    /// The catalog is unavailable or a referenced package does not exist.
    #[error("not found")]
    NotFound,
    /// No non-empty package subset satisfies the price constraint.
    #[error("no feasible combination under the given constraints")]
    NoFeasibleCombination,
    /// Optimization exceeded its time budget before finding any candidate.
    #[error("optimization timed out")]
    Timeout,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
