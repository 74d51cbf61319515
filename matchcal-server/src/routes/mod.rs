pub mod calendar;
pub mod health;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Convert anyhow errors to HTTP responses
///
/// Feed consumers are calendar clients, so failures are plain text rather than JSON.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %format!("{:#}", self.0), "Failed to generate calendar");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Calendar generation failed: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
