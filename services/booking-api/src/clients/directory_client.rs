use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::domain::{IssuedToken, TokenReply, UserDetailReply, UserIdReply, UserProfile};
use crate::errors::DirectoryError;

/// Calls the handlers and the token cache need from the enterprise directory.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Issue a new access token for the configured corp credentials.
    async fn fetch_access_token(&self) -> Result<IssuedToken, DirectoryError>;

    /// Exchange an OAuth authorization code for the member's user id.
    async fn fetch_user_id(&self, access_token: &str, code: &str)
        -> Result<String, DirectoryError>;

    async fn fetch_user_profile(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<UserProfile, DirectoryError>;
}

pub struct DirectoryClient {
    client: Client,
    base_url: String,
    corp_id: String,
    corp_secret: String,
}

impl DirectoryClient {
    pub fn new(config: &Config) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent("booking-api/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: config.directory_api_base.clone(),
            corp_id: config.corp_id.clone(),
            corp_secret: config.corp_secret.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Directory for DirectoryClient {
    async fn fetch_access_token(&self) -> Result<IssuedToken, DirectoryError> {
        let url = self.url("gettoken");
        info!("Fetching directory access token from: {}", url);

        let reply = self
            .client
            .get(&url)
            .query(&[
                ("corpid", self.corp_id.as_str()),
                ("corpsecret", self.corp_secret.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<TokenReply>()
            .await?;

        reply.into_issued()
    }

    async fn fetch_user_id(
        &self,
        access_token: &str,
        code: &str,
    ) -> Result<String, DirectoryError> {
        let url = self.url("user/getuserinfo");
        info!("Exchanging authorization code at: {}", url);

        let reply = self
            .client
            .get(&url)
            .query(&[("access_token", access_token), ("code", code)])
            .send()
            .await?
            .error_for_status()?
            .json::<UserIdReply>()
            .await?;

        reply.into_user_id()
    }

    async fn fetch_user_profile(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<UserProfile, DirectoryError> {
        let url = self.url("user/get");
        info!("Fetching profile for {} from: {}", user_id, url);

        let reply = self
            .client
            .get(&url)
            .query(&[("access_token", access_token), ("userid", user_id)])
            .send()
            .await?
            .error_for_status()?
            .json::<UserDetailReply>()
            .await?;

        reply.into_profile(user_id.to_string())
    }
}
