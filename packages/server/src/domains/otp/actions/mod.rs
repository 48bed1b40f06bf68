// Action functions for the OTP domain
pub mod issue_otp;
pub mod verify_otp;

pub use issue_otp::{generate_code, issue_otp, DeliveryMode, IssuedOtp};
pub use verify_otp::{verify_otp, VerifyFailure, VerifyOtpResult};
