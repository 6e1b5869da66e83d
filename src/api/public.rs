//! Public API types

use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::core::AssistError;

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response. Errors meant
/// for the user are a bad request, anything else is on us.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<AssistError>() {
            tracing::warn!("{}", err);
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }

        // Always log the error
        tracing::error!("{}", self.0);

        // Respond with an error status
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self.0),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod analyze {
    pub use crate::api::routes::analyze::public::*;
}

pub mod sessions {
    pub use crate::api::routes::sessions::public::*;
}
