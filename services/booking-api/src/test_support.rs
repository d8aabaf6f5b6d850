//! Shared fixtures for unit tests: an in-memory `Directory` and a ready config.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::clients::Directory;
use crate::config::{Config, Environment};
use crate::domain::{IssuedToken, UserProfile};
use crate::errors::DirectoryError;
use crate::state::AppState;

pub const KNOWN_CODE: &str = "code-lilei";
/// A code whose lookup fails because the provider rejects the access token.
pub const REVOKED_TOKEN_CODE: &str = "code-revoked-token";

pub struct StubDirectory {
    token_calls: AtomicUsize,
    token_lifetime: i64,
    fail_token: bool,
    codes: HashMap<String, String>,
    profiles: HashMap<String, UserProfile>,
}

impl StubDirectory {
    pub fn new() -> Self {
        let profile = UserProfile {
            user_id: "lilei".to_string(),
            user_name: "Li Lei".to_string(),
            department: vec![1, 7],
            position: "Engineer".to_string(),
        };

        Self {
            token_calls: AtomicUsize::new(0),
            token_lifetime: 7200,
            fail_token: false,
            codes: HashMap::from([
                (KNOWN_CODE.to_string(), "lilei".to_string()),
                ("code-ghost".to_string(), "ghost".to_string()),
            ]),
            profiles: HashMap::from([("lilei".to_string(), profile)]),
        }
    }

    pub fn with_token_lifetime(mut self, secs: i64) -> Self {
        self.token_lifetime = secs;
        self
    }

    pub fn failing_token(mut self) -> Self {
        self.fail_token = true;
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Directory for StubDirectory {
    async fn fetch_access_token(&self) -> Result<IssuedToken, DirectoryError> {
        let n = self.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_token {
            return Err(DirectoryError::Provider {
                operation: "gettoken",
                errcode: 40013,
                errmsg: "invalid corpid".to_string(),
            });
        }

        Ok(IssuedToken {
            access_token: format!("token-{}", n),
            expires_in: self.token_lifetime,
        })
    }

    async fn fetch_user_id(
        &self,
        _access_token: &str,
        code: &str,
    ) -> Result<String, DirectoryError> {
        if code == REVOKED_TOKEN_CODE {
            return Err(DirectoryError::Provider {
                operation: "user/getuserinfo",
                errcode: 42001,
                errmsg: "access_token expired".to_string(),
            });
        }

        self.codes
            .get(code)
            .cloned()
            .ok_or_else(|| DirectoryError::Provider {
                operation: "user/getuserinfo",
                errcode: 40029,
                errmsg: "invalid code".to_string(),
            })
    }

    async fn fetch_user_profile(
        &self,
        _access_token: &str,
        user_id: &str,
    ) -> Result<UserProfile, DirectoryError> {
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::Provider {
                operation: "user/get",
                errcode: 60111,
                errmsg: "userid not found".to_string(),
            })
    }
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        corp_id: "corp-test".to_string(),
        corp_secret: "secret-test".to_string(),
        directory_api_base: "http://127.0.0.1:9/cgi-bin".to_string(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        host: "127.0.0.1".to_string(),
        port: 0,
        environment,
        public_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
        http_timeout_secs: 1,
    }
}

pub fn test_state(environment: Environment) -> AppState {
    AppState::new(test_config(environment), Arc::new(StubDirectory::new()))
}
