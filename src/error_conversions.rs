//! Error conversion glue between the layers.
//!
//! The domain layer must not depend on service/repository error types;
//! conversions live here so that `?` works across layer boundaries.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::EmptyCatalog => ServiceError::NotFound,
            other => {
                log::error!("repository failure: {other}");
                ServiceError::Internal
            }
        }
    }
}
