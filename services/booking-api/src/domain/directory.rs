//! Wire types for the enterprise directory API (`gettoken`, `user/getuserinfo`, `user/get`).
//!
//! Every reply carries `errcode`/`errmsg`; `errcode == 0` means success.

use serde::Deserialize;

use crate::domain::UserProfile;
use crate::errors::DirectoryError;

#[derive(Debug, Deserialize)]
pub struct TokenReply {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdReply {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    #[serde(rename = "UserId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserDetailReply {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    pub name: Option<String>,
    pub department: Option<Vec<i64>>,
    pub position: Option<String>,
}

/// A freshly issued access token and its lifetime in seconds as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

impl TokenReply {
    pub fn into_issued(self) -> Result<IssuedToken, DirectoryError> {
        const OP: &str = "gettoken";
        DirectoryError::check(OP, self.errcode, &self.errmsg)?;

        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(DirectoryError::MissingField {
                operation: OP,
                field: "access_token",
            })?;
        let expires_in = self.expires_in.ok_or(DirectoryError::MissingField {
            operation: OP,
            field: "expires_in",
        })?;

        Ok(IssuedToken {
            access_token,
            expires_in,
        })
    }
}

impl UserIdReply {
    pub fn into_user_id(self) -> Result<String, DirectoryError> {
        const OP: &str = "user/getuserinfo";
        DirectoryError::check(OP, self.errcode, &self.errmsg)?;

        self.user_id
            .filter(|id| !id.is_empty())
            .ok_or(DirectoryError::MissingField {
                operation: OP,
                field: "UserId",
            })
    }
}

impl UserDetailReply {
    pub fn into_profile(self, user_id: String) -> Result<UserProfile, DirectoryError> {
        const OP: &str = "user/get";
        DirectoryError::check(OP, self.errcode, &self.errmsg)?;

        let user_name = self.name.ok_or(DirectoryError::MissingField {
            operation: OP,
            field: "name",
        })?;

        Ok(UserProfile {
            user_id,
            user_name,
            department: self.department.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_reply_parses_provider_payload() {
        let reply: TokenReply = serde_json::from_str(
            r#"{"errcode":0,"errmsg":"ok","access_token":"tok-1","expires_in":7200}"#,
        )
        .unwrap();

        assert_eq!(
            reply.into_issued().unwrap(),
            IssuedToken {
                access_token: "tok-1".into(),
                expires_in: 7200
            }
        );
    }

    #[test]
    fn token_reply_with_error_code_is_rejected() {
        let reply: TokenReply =
            serde_json::from_str(r#"{"errcode":40001,"errmsg":"invalid credential"}"#).unwrap();

        match reply.into_issued() {
            Err(DirectoryError::Provider { errcode, .. }) => assert_eq!(errcode, 40001),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn user_id_reply_without_user_id_is_rejected() {
        // Non-members come back with an OpenId instead of a UserId.
        let reply: UserIdReply =
            serde_json::from_str(r#"{"errcode":0,"errmsg":"ok","OpenId":"o-123"}"#).unwrap();

        match reply.into_user_id() {
            Err(DirectoryError::MissingField { field, .. }) => assert_eq!(field, "UserId"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn user_detail_defaults_optional_fields() {
        let reply: UserDetailReply =
            serde_json::from_str(r#"{"errcode":0,"errmsg":"ok","name":"Li Lei"}"#).unwrap();

        let profile = reply.into_profile("lilei".into()).unwrap();
        assert_eq!(profile.user_name, "Li Lei");
        assert!(profile.department.is_empty());
        assert_eq!(profile.position, "");
    }
}
