use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method, Uri},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;
use tracing::warn;

use crate::config::Config;
use crate::errors::ApiError;
use crate::handlers::{
    cancel_appointment, get_user_info, health_check, index_page, my_appointments,
    my_appointments_page, submit_appointment,
};
use crate::middleware::{panic_responder, request_logging_middleware};
use crate::state::AppState;

const JSON_BODY_LIMIT: usize = 10 * 1024;

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    let development = state.config.is_development();

    let cache_control = if development {
        HeaderValue::from_static("no-cache")
    } else {
        HeaderValue::from_static("public, max-age=86400")
    };
    let assets = ServeDir::new(&state.config.public_dir)
        .append_index_html_on_directories(false)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());
    let assets = SetResponseHeader::if_not_present(assets, header::CACHE_CONTROL, cache_control);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Identity
        .route("/api/get-user-info", get(get_user_info))
        // Appointments
        .route("/api/submit", post(submit_appointment))
        .route("/api/my-appointments", get(my_appointments))
        .route("/api/cancel-appointment", post(cancel_appointment))
        // Pages
        .route("/", get(index_page))
        .route("/my-appointments", get(my_appointments_page))
        // Page assets, then JSON 404
        .fallback_service(assets)
        // Apply middleware
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CatchPanicLayer::custom(panic_responder(development)))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        ApiError::not_found(format!("Resource {} {} not found", method, uri)),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
