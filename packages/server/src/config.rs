use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Twilio credentials. Present as a group or not at all.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// How long an issued code stays valid.
    pub otp_ttl: Duration,
    /// When true, a code that could not be delivered via SMS is echoed in
    /// the HTTP response (development fallback). Explicit opt-in only.
    pub code_echo_enabled: bool,
    /// SMS delivery credentials. `None` disables SMS delivery entirely.
    pub twilio: Option<TwilioConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let otp_ttl_seconds: u64 = env::var("OTP_TTL_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .context("OTP_TTL_SECONDS must be a valid number")?;

        let code_echo_enabled = env::var("OTP_CODE_ECHO_ENABLED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            port,
            otp_ttl: Duration::from_secs(otp_ttl_seconds),
            code_echo_enabled,
            twilio: load_twilio_config()?,
        })
    }
}

/// Read the TWILIO_* variable group. Setting some but not all of them is a
/// configuration error rather than a silent fall-through to console mode.
fn load_twilio_config() -> Result<Option<TwilioConfig>> {
    let account_sid = env::var("TWILIO_ACCOUNT_SID").ok();
    let auth_token = env::var("TWILIO_AUTH_TOKEN").ok();
    let from_number = env::var("TWILIO_PHONE_NUMBER").ok();

    match (account_sid, auth_token, from_number) {
        (Some(account_sid), Some(auth_token), Some(from_number)) => Ok(Some(TwilioConfig {
            account_sid,
            auth_token,
            from_number,
        })),
        (None, None, None) => Ok(None),
        _ => bail!(
            "TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, and TWILIO_PHONE_NUMBER must be set together"
        ),
    }
}
