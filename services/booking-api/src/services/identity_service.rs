use tracing::{info, warn};

use crate::clients::Directory;
use crate::domain::UserProfile;
use crate::errors::DirectoryError;
use crate::services::TokenCache;

pub struct IdentityService;

impl IdentityService {
    /// Resolve an OAuth authorization code to the member's profile.
    pub async fn lookup(
        tokens: &TokenCache,
        directory: &dyn Directory,
        code: &str,
    ) -> Result<UserProfile, DirectoryError> {
        let access_token = tokens.access_token().await?;

        let result = Self::resolve(directory, &access_token, code).await;
        if let Err(e) = &result {
            if e.is_token_rejected() {
                warn!("Directory refused the cached access token, dropping it: {}", e);
                tokens.invalidate().await;
            }
        }
        result
    }

    async fn resolve(
        directory: &dyn Directory,
        access_token: &str,
        code: &str,
    ) -> Result<UserProfile, DirectoryError> {
        let user_id = directory.fetch_user_id(access_token, code).await?;
        info!("Authorization code resolved to user {}", user_id);

        let profile = directory.fetch_user_profile(access_token, &user_id).await?;
        info!("Loaded profile for {} ({})", profile.user_id, profile.user_name);

        Ok(profile)
    }
}
