//! Request/response types for the contact verification API.
//!
//! Field names are camelCase on the wire to match the admin frontend.

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Request to send a verification code to a phone number.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendPhoneCodePayload {
    /// International format with country code, e.g. `+919876543210`.
    #[garde(length(min = 1))]
    pub phone_number: String,
}

/// Submit the code received by SMS.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPhoneCodePayload {
    #[garde(length(min = 1))]
    pub phone_number: String,
    #[garde(length(min = 1))]
    pub otp: String,
}

/// Request to send a verification code to an email address.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailCodePayload {
    #[garde(length(min = 1))]
    pub email: String,
}

/// Submit the code received by email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailCodePayload {
    #[garde(length(min = 1))]
    pub email: String,
    #[garde(length(min = 1))]
    pub otp: String,
}

/// Returned after a code has been dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
    /// The issued code. Only present when the server runs with debug codes
    /// enabled; never set in production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_code: Option<String>,
}

/// Returned after a code has been accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
