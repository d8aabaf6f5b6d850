use serde::{Deserialize, Serialize};

/// A directory member resolved from an authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub user_name: String,
    pub department: Vec<i64>,
    pub position: String,
}
