use actix_web::HttpResponse;
use serde::Serialize;

use crate::services::ServiceError;

pub mod api;

/// JSON error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Maps service failures onto externally observable responses.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let message = err.to_string();
    match err {
        ServiceError::Validation(_) => HttpResponse::BadRequest().json(ErrorBody {
            error: "ValidationError",
            message,
        }),
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody {
            error: "NotFound",
            message,
        }),
        ServiceError::NoFeasibleCombination => {
            HttpResponse::UnprocessableEntity().json(ErrorBody {
                error: "NoFeasibleCombination",
                message,
            })
        }
        ServiceError::Timeout => HttpResponse::GatewayTimeout().json(ErrorBody {
            error: "Timeout",
            message,
        }),
        ServiceError::Internal => {
            log::error!("internal error while handling request");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: "Internal",
                message,
            })
        }
    }
}
