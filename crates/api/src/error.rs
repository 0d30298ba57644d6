use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::api::ErrorResponse;

use crate::otp::OtpError;

#[derive(Debug)]
pub enum AppError {
    /// Internal errors - logged but return generic 500 to user
    Internal(anyhow::Error),
    /// User-facing errors - message is safe to show
    External(StatusCode, &'static str),
    /// Validation errors - safe to show
    Validation(String),
}

impl AppError {
    /// Map a verification workflow failure to its user-facing response.
    /// Missing and wrong/expired codes share one message so callers cannot
    /// tell which case occurred.
    pub fn otp(err: OtpError) -> Self {
        match err {
            OtpError::InvalidFormat => Self::External(
                StatusCode::BAD_REQUEST,
                "Invalid phone number format. Please include country code (e.g. +91xxxxxxxxxx)",
            ),
            OtpError::DispatchFailed(_) => Self::External(
                StatusCode::BAD_GATEWAY,
                "Failed to send OTP. Please check the destination and try again.",
            ),
            OtpError::NoPendingCode | OtpError::InvalidOrExpired => {
                Self::External(StatusCode::BAD_REQUEST, "Invalid or expired OTP")
            }
            OtpError::Store(err) => Self::Internal(err),
        }
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {:?}", err);
                sentry::capture_error(
                    err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static)
                );

                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::External(status, msg) => error_body(status, msg),
            AppError::Validation(msg) => error_body(StatusCode::BAD_REQUEST, msg),
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
