use std::fmt::Display;
use std::sync::Arc;

use crate::clients::Directory;
use crate::config::Config;
use crate::errors::ApiError;
use crate::repo::AppointmentRepo;
use crate::services::TokenCache;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<dyn Directory>,
    pub tokens: Arc<TokenCache>,
    pub appointments: Arc<AppointmentRepo>,
}

impl AppState {
    pub fn new(config: Config, directory: Arc<dyn Directory>) -> Self {
        Self {
            tokens: Arc::new(TokenCache::new(directory.clone())),
            appointments: Arc::new(AppointmentRepo::new()),
            directory,
            config,
        }
    }

    /// 500 with a generic message; the cause is attached only in development.
    pub fn upstream_error(&self, message: &str, cause: impl Display) -> ApiError {
        let err = ApiError::upstream(message);
        if self.config.is_development() {
            err.with_detail(cause.to_string())
        } else {
            tracing::error!(trace_id = %err.trace_id, "{}: {}", message, cause);
            err
        }
    }
}
