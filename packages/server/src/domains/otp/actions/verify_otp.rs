//! Verify OTP action

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domains::otp::normalize_phone_number;
use crate::kernel::ServerDeps;

/// Why a verification attempt failed.
///
/// These are expected everyday outcomes, not faults: they travel as values,
/// never as errors. The serialized reason codes feed UI messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyFailure {
    /// No live code for this number: never issued, already consumed, or
    /// already swept.
    #[error("no code found for this phone number")]
    NotFound,
    /// The code existed but its TTL had elapsed. The entry is gone either
    /// way; a later attempt reports `NOT_FOUND`.
    #[error("code has expired")]
    Expired,
    /// The supplied code did not match. The entry is consumed even on a
    /// wrong guess, so a correct retry needs a fresh code.
    #[error("code does not match")]
    Mismatch,
}

/// Result of verifying an OTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOtpResult {
    Valid,
    Invalid { reason: VerifyFailure },
}

impl VerifyOtpResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOtpResult::Valid)
    }

    pub fn reason(&self) -> Option<VerifyFailure> {
        match self {
            VerifyOtpResult::Valid => None,
            VerifyOtpResult::Invalid { reason } => Some(*reason),
        }
    }
}

/// Check a supplied code against the stored entry for a phone number.
///
/// Every attempt consumes the entry: `take` removes it before the expiry
/// and equality checks run. That is what enforces single use - even a
/// failed guess invalidates the code. On success the caller proceeds to
/// session issuance, which lives outside this service.
pub async fn verify_otp(phone_number: String, code: String, deps: &ServerDeps) -> VerifyOtpResult {
    let key = normalize_phone_number(&phone_number);

    let entry = match deps.otp_store.take(&key).await {
        Some(entry) => entry,
        None => {
            info!("OTP verification failed: no stored code");
            return VerifyOtpResult::Invalid {
                reason: VerifyFailure::NotFound,
            };
        }
    };

    if entry.is_expired(Utc::now()) {
        info!("OTP verification failed: code expired");
        return VerifyOtpResult::Invalid {
            reason: VerifyFailure::Expired,
        };
    }

    if entry.code != code {
        info!("OTP verification failed: code mismatch");
        return VerifyOtpResult::Invalid {
            reason: VerifyFailure::Mismatch,
        };
    }

    info!("OTP verified");
    VerifyOtpResult::Valid
}
