//! OTP domain - phone-based one-time codes
//!
//! Responsibilities:
//! - Phone number normalization (one policy, applied at issue and verify)
//! - Short-lived, single-use code storage with overwrite-on-reissue
//! - Code issuance with best-effort SMS delivery
//! - Verification with NOT_FOUND / EXPIRED / MISMATCH outcomes

pub mod actions;
pub mod models;
pub mod normalize;
pub mod store;

pub use actions::{
    generate_code, issue_otp, verify_otp, DeliveryMode, IssuedOtp, VerifyFailure, VerifyOtpResult,
};
pub use models::OtpEntry;
pub use normalize::normalize_phone_number;
pub use store::OtpStore;
