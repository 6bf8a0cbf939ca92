mod admin;
mod auth;
mod middleware;
mod session;

pub use admin::AdminState;
pub use middleware::CurrentUser;
pub use session::{SESSION_COOKIE, SessionSigner};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::error::{ErrorReport, HttpError};
use crate::application::repos::RepoError;
use crate::presentation::views::render_not_found_response;

/// Multipart submissions above this size are rejected outright.
pub const DEFAULT_UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Assemble the full application router: public login routes plus the
/// session-gated admin panel, wrapped in request-context and response
/// logging middleware.
pub fn build_router(state: AdminState, upload_body_limit: usize) -> Router {
    let gated = admin::admin_routes(upload_body_limit)
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    Router::new()
        .merge(gated)
        .route("/login", get(auth::login_form).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        .route("/healthz", get(db_health))
        .fallback(not_found)
        .layer(from_fn(middleware::log_responses))
        .layer(from_fn(middleware::set_request_context))
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    render_not_found_response()
}

async fn db_health(State(state): State<AdminState>) -> Response {
    match state.db.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

/// Map a repository error to a consistent HTTP error response.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    match err {
        RepoError::Duplicate { constraint } => {
            HttpError::new(source, StatusCode::CONFLICT, "Duplicate record", constraint)
        }
        RepoError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            "resource not found",
        ),
        RepoError::InvalidInput { message } => {
            HttpError::new(source, StatusCode::BAD_REQUEST, "Invalid input", message)
        }
        RepoError::Integrity { message } => HttpError::new(
            source,
            StatusCode::CONFLICT,
            "Integrity constraint violated",
            message,
        ),
        RepoError::Timeout => HttpError::new(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "Database timeout",
            "Database timeout",
        ),
        RepoError::Persistence(message) => HttpError::new(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Persistence error",
            message,
        ),
    }
}
