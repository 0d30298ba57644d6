//! Phone and email verification by one-time code.
//!
//! Endpoints:
//! - POST /api/send-otp - Send a code by SMS to `phoneNumber`
//! - POST /api/verify-otp - Check `otp` for `phoneNumber`
//! - POST /api/send-email-otp - Send a code by email to `email`
//! - POST /api/verify-email-otp - Check `otp` for `email`
//!
//! Security notes:
//! - Codes are never logged
//! - The code is echoed in the send response only with `EXPOSE_DEBUG_CODE` set
//! - Missing and wrong/expired codes produce the same response

use axum::{Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post};
use chrono::Utc;
use garde::Validate;
use shared::api::{
    SendCodeResponse, SendEmailCodePayload, SendPhoneCodePayload, VerifyCodeResponse,
    VerifyEmailCodePayload, VerifyPhoneCodePayload,
};

use crate::{error::AppError, otp::OtpFlow, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_phone_code))
        .route("/verify-otp", post(verify_phone_code))
        .route("/send-email-otp", post(send_email_code))
        .route("/verify-email-otp", post(verify_email_code))
}

#[debug_handler]
async fn send_phone_code(
    State(state): State<AppState>,
    Json(payload): Json<SendPhoneCodePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    send_code(&state, &state.phone, &payload.phone_number).await
}

#[debug_handler]
async fn verify_phone_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyPhoneCodePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    verify_code(&state.phone, &payload.phone_number, &payload.otp).await
}

#[debug_handler]
async fn send_email_code(
    State(state): State<AppState>,
    Json(payload): Json<SendEmailCodePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    send_code(&state, &state.email, &payload.email).await
}

#[debug_handler]
async fn verify_email_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailCodePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    verify_code(&state.email, &payload.email, &payload.otp).await
}

async fn send_code(
    state: &AppState,
    flow: &OtpFlow,
    identifier: &str,
) -> Result<Json<SendCodeResponse>, AppError> {
    let issued = flow
        .issuer
        .issue(identifier, Utc::now())
        .await
        .map_err(AppError::otp)?;

    tracing::info!(channel = %flow.channel(), identifier, "verification code sent");

    Ok(Json(SendCodeResponse {
        success: true,
        message: format!("OTP sent successfully to {}", issued.identifier),
        debug_code: state
            .config
            .expose_debug_code
            .then(|| issued.code.to_string()),
    }))
}

async fn verify_code(
    flow: &OtpFlow,
    identifier: &str,
    otp: &str,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    if let Err(err) = flow.verifier.verify(identifier, otp, Utc::now()).await {
        if err.is_rejection() {
            tracing::warn!(channel = %flow.channel(), identifier, "verification failed: {}", err);
        }
        return Err(AppError::otp(err));
    }

    tracing::info!(channel = %flow.channel(), identifier, "contact verified");

    Ok(Json(VerifyCodeResponse { verified: true }))
}
