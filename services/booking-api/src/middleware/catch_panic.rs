use axum::response::{IntoResponse, Response};
use std::any::Any;

use crate::errors::ApiError;

/// Build the catch-all responder for handler panics.
///
/// The panic text reaches the client only in development.
pub fn panic_responder(
    development: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |panic: Box<dyn Any + Send + 'static>| {
        let reason = panic_message(panic.as_ref());
        tracing::error!("Handler panicked: {}", reason);

        let message = if development {
            reason
        } else {
            "Internal server error".to_string()
        };

        ApiError::internal(message).into_response()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
