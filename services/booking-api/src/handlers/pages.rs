use axum::extract::State;
use axum::response::Html;

use crate::errors::ApiError;
use crate::state::AppState;

pub const INDEX_PAGE: &str = "index.html";
pub const MY_APPOINTMENTS_PAGE: &str = "my-appointments.html";

/// Booking form
pub async fn index_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    load_page(&state, INDEX_PAGE, "Unable to load the booking page").await
}

/// Appointment list
pub async fn my_appointments_page(
    State(state): State<AppState>,
) -> Result<Html<String>, ApiError> {
    load_page(
        &state,
        MY_APPOINTMENTS_PAGE,
        "Unable to load the appointment list page",
    )
    .await
}

async fn load_page(state: &AppState, file: &str, message: &str) -> Result<Html<String>, ApiError> {
    let path = state.config.public_dir.join(file);

    tokio::fs::read_to_string(&path).await.map(Html).map_err(|e| {
        tracing::error!("Failed to read {}: {}", path.display(), e);
        ApiError::internal(message)
    })
}
