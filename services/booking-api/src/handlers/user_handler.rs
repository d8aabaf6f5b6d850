use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::domain::UserProfile;
use crate::errors::ApiError;
use crate::handlers::query_error;
use crate::services::IdentityService;
use crate::state::AppState;

const MISSING_CODE: &str = "Missing code parameter";

#[derive(Debug, Deserialize, Validate)]
pub struct UserInfoQuery {
    #[validate(required, length(min = 1))]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub success: bool,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Resolve the OAuth code handed to the booking page into the signed-in member.
pub async fn get_user_info(
    State(state): State<AppState>,
    query: Result<Query<UserInfoQuery>, QueryRejection>,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let Query(query) = query.map_err(|e| query_error(e, MISSING_CODE))?;
    query
        .validate()
        .map_err(|_| ApiError::validation(MISSING_CODE))?;
    let code = query.code.unwrap_or_default();
    info!("Resolving authorization code {}", code);

    let profile = IdentityService::lookup(&state.tokens, state.directory.as_ref(), &code)
        .await
        .map_err(|e| state.upstream_error("Failed to get user info", e))?;

    Ok(Json(UserInfoResponse {
        success: true,
        profile,
    }))
}
