use axum::extract::rejection::{JsonRejection, QueryRejection};
use tracing::debug;

use crate::errors::ApiError;

pub mod appointment_handler;
pub mod health;
pub mod pages;
pub mod user_handler;

pub use appointment_handler::*;
pub use health::*;
pub use pages::*;
pub use user_handler::*;

/// Unreadable JSON counts as missing fields; only oversized bodies keep their own status.
fn body_error(rejection: JsonRejection, message: &'static str) -> ApiError {
    match rejection {
        rejection @ JsonRejection::BytesRejection(_) => {
            ApiError::new(rejection.status(), "INVALID_BODY", rejection.body_text())
        }
        rejection => {
            debug!("Rejected request body: {}", rejection.body_text());
            ApiError::validation(message)
        }
    }
}

fn query_error(rejection: QueryRejection, message: &'static str) -> ApiError {
    debug!("Rejected query string: {}", rejection.body_text());
    ApiError::validation(message)
}
