// EmergencyConnect - API Core
//
// This crate provides the phone-verification (OTP) backend for the
// EmergencyConnect community emergency-reporting platform. Incident
// reporting, contact management, and the browser UI run as separate
// services; this one owns issuing and checking one-time codes.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
