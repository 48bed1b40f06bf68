//! Server dependencies for domain actions (using traits for testability)
//!
//! Central dependency container injected into the OTP actions. The store is
//! an explicit instance owned here - never a module-level singleton - so
//! tests build isolated stores and a multi-instance deployment can swap a
//! networked backing store behind the same interface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use twilio::TwilioService;

use crate::domains::otp::OtpStore;
use crate::kernel::traits::BaseSmsDelivery;

// =============================================================================
// TwilioService Adapter (implements BaseSmsDelivery trait)
// =============================================================================

/// Wrapper around TwilioService that implements the BaseSmsDelivery trait
pub struct TwilioDelivery(pub Arc<TwilioService>);

impl TwilioDelivery {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseSmsDelivery for TwilioDelivery {
    async fn send_code(&self, phone_number: &str, code: &str) -> Result<()> {
        let body = format!("Your EmergencyConnect verification code is: {}", code);
        self.0
            .send_sms(phone_number, &body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub otp_store: Arc<OtpStore>,
    /// SMS delivery channel; `None` means no channel is configured and
    /// issuance degrades to console mode.
    pub sms_delivery: Option<Arc<dyn BaseSmsDelivery>>,
    /// TTL applied to every issued code.
    pub otp_ttl: Duration,
    /// Echo undelivered codes in the HTTP response. Explicit development
    /// fallback carried from Config, not an ambient environment check.
    pub code_echo_enabled: bool,
}

impl ServerDeps {
    pub fn new(
        otp_store: Arc<OtpStore>,
        sms_delivery: Option<Arc<dyn BaseSmsDelivery>>,
        otp_ttl: Duration,
        code_echo_enabled: bool,
    ) -> Self {
        Self {
            otp_store,
            sms_delivery,
            otp_ttl,
            code_echo_enabled,
        }
    }
}
