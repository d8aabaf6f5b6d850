use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::clients::Directory;
use crate::errors::DirectoryError;

/// Seconds shaved off the provider-reported lifetime.
const EXPIRY_MARGIN_SECS: i64 = 200;
const MIN_LIFETIME_SECS: i64 = 10;

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Holds the directory access token and refetches it once it expires.
///
/// The lock is held across the refetch, so concurrent callers share one
/// upstream request instead of racing each other.
pub struct TokenCache {
    directory: Arc<dyn Directory>,
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            directory,
            slot: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, DirectoryError> {
        let mut slot = self.slot.lock().await;
        let now = Instant::now();

        if let Some(cached) = slot.as_ref() {
            if now < cached.expires_at {
                debug!("Using cached access token {}", redact(&cached.token));
                return Ok(cached.token.clone());
            }
        }

        let issued = self.directory.fetch_access_token().await?;
        let lifetime = effective_lifetime(issued.expires_in);

        info!(
            "Fetched new access token {}, valid for {} seconds",
            redact(&issued.access_token),
            lifetime.as_secs()
        );

        *slot = Some(CachedToken {
            token: issued.access_token.clone(),
            expires_at: now + lifetime,
        });

        Ok(issued.access_token)
    }

    /// Drop the cached token so the next caller fetches a fresh one.
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}

pub fn effective_lifetime(expires_in: i64) -> Duration {
    let secs = expires_in
        .saturating_sub(EXPIRY_MARGIN_SECS)
        .max(MIN_LIFETIME_SECS);
    Duration::from_secs(secs as u64)
}

fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{}...", prefix)
}
