use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    otp_entries: usize,
}

/// Health check endpoint
///
/// The OTP store is in-process, so there is no dependency that can fail;
/// store occupancy is reported for observability.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let otp_entries = state.server_deps.otp_store.len().await;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            otp_entries,
        }),
    )
}
