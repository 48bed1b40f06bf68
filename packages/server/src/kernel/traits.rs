// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like issuing a code) lives in domain actions that use
// these traits.
//
// Naming convention: Base* for trait names

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// SMS Delivery Trait (Infrastructure)
// =============================================================================

/// Out-of-band delivery channel for one-time codes.
///
/// The production implementation sends an SMS through Twilio; tests inject
/// recording or failing mocks. Delivery is best-effort at every call site:
/// a failure downgrades the issuance response, it never fails issuance.
#[async_trait]
pub trait BaseSmsDelivery: Send + Sync {
    /// Send a verification code to a phone number.
    async fn send_code(&self, phone_number: &str, code: &str) -> Result<()>;
}
