// TestDependencies - mock implementations for testing
//
// Provides mock delivery channels that can be injected into ServerDeps
// for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::otp::OtpStore;
use crate::kernel::deps::ServerDeps;
use crate::kernel::traits::BaseSmsDelivery;

// =============================================================================
// Mock SMS Delivery
// =============================================================================

/// Records every delivery call; succeeds or fails depending on how it was
/// constructed.
pub struct MockSmsDelivery {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl MockSmsDelivery {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A channel whose every send fails, for exercising the fallback path.
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// All (phone, code) pairs attempted so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a delivery was attempted to a phone number
    pub fn was_sent_to(&self, phone_number: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|(p, _)| p == phone_number)
    }
}

impl Default for MockSmsDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSmsDelivery for MockSmsDelivery {
    async fn send_code(&self, phone_number: &str, code: &str) -> Result<()> {
        // Record the call
        self.calls
            .lock()
            .unwrap()
            .push((phone_number.to_string(), code.to_string()));

        if self.fail {
            anyhow::bail!("mock delivery failure");
        }
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps with an isolated store per test case.
pub struct TestDependencies {
    delivery: Option<Arc<MockSmsDelivery>>,
    otp_ttl: Duration,
    code_echo_enabled: bool,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            delivery: None,
            otp_ttl: Duration::from_secs(300),
            code_echo_enabled: false,
        }
    }

    pub fn with_delivery(mut self, delivery: Arc<MockSmsDelivery>) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.otp_ttl = ttl;
        self
    }

    pub fn with_code_echo(mut self) -> Self {
        self.code_echo_enabled = true;
        self
    }

    pub fn build(self) -> ServerDeps {
        ServerDeps::new(
            Arc::new(OtpStore::new()),
            self.delivery
                .map(|delivery| delivery as Arc<dyn BaseSmsDelivery>),
            self.otp_ttl,
            self.code_echo_enabled,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
