//! REST routes for OTP issuance and verification.
//!
//! Wire shapes match the browser client: camelCase request fields, 400 with
//! `{error}` for missing input, verification failures as ordinary
//! `{success: true, valid: false, reason}` results.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::otp::{issue_otp, verify_otp, DeliveryMode, VerifyFailure};
use crate::server::app::AxumAppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    pub mode: DeliveryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<VerifyFailure>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Request OTP endpoint
///
/// Issuance always succeeds once the code is stored; the response `mode`
/// tells the caller whether the code went out via SMS or must be obtained
/// another way. No state mutation happens on invalid input.
pub async fn send_otp_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<SendOtpRequest>,
) -> Response {
    let phone_number = match request.phone_number.filter(|p| !p.trim().is_empty()) {
        Some(phone_number) => phone_number,
        None => return bad_request("Phone number is required"),
    };

    match issue_otp(phone_number, &state.server_deps).await {
        Ok(issued) => {
            let message = match issued.mode {
                DeliveryMode::Sms => "OTP sent via SMS",
                DeliveryMode::Console => "OTP sent successfully",
            };
            (
                StatusCode::OK,
                Json(SendOtpResponse {
                    success: true,
                    message: message.to_string(),
                    mode: issued.mode,
                    code: issued.code,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue OTP");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to send OTP".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Verify OTP endpoint
///
/// Wrong, expired, or missing codes are ordinary `valid: false` results
/// with a reason code, never an error status. On `valid: true` the caller
/// proceeds to session issuance, which lives outside this service.
pub async fn verify_otp_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Response {
    let (phone_number, code) = match (
        request.phone_number.filter(|p| !p.trim().is_empty()),
        request.code.filter(|c| !c.trim().is_empty()),
    ) {
        (Some(phone_number), Some(code)) => (phone_number, code),
        _ => return bad_request("Phone number and code are required"),
    };

    let result = verify_otp(phone_number, code, &state.server_deps).await;

    (
        StatusCode::OK,
        Json(VerifyOtpResponse {
            success: true,
            valid: result.is_valid(),
            reason: result.reason(),
        }),
    )
        .into_response()
}
