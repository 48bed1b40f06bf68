//! Issue OTP action

use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::domains::otp::normalize_phone_number;
use crate::kernel::ServerDeps;

/// Upper bound on one delivery attempt. The code is already stored by the
/// time delivery starts, so a stalled gateway must not stall issuance.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// How the caller is expected to receive the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Sms,
    Console,
}

/// Result of issuing an OTP
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// Populated only in console mode with the code-echo flag enabled.
    pub code: Option<String>,
    pub mode: DeliveryMode,
}

/// Generate a uniformly random six-digit code.
///
/// Range 100000-999999: a leading zero is impossible by construction, so
/// every code matches `^[1-9][0-9]{5}$`.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Issue a one-time code for a phone number.
///
/// The code is stored before any delivery I/O begins, and the store lock is
/// not held across the delivery await. Issuance succeeds once storage
/// succeeds; a delivery failure only downgrades the delivery mode.
/// Re-issuing for the same number invalidates the previous code.
pub async fn issue_otp(phone_number: String, deps: &ServerDeps) -> Result<IssuedOtp> {
    let key = normalize_phone_number(&phone_number);
    let code = generate_code();

    deps.otp_store.put(&key, code.clone(), deps.otp_ttl).await;

    let delivered = match &deps.sms_delivery {
        Some(delivery) => {
            match tokio::time::timeout(DELIVERY_TIMEOUT, delivery.send_code(&key, &code)).await {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    error!(error = %e, "Failed to send OTP via SMS");
                    false
                }
                Err(_) => {
                    error!("OTP delivery timed out after {:?}", DELIVERY_TIMEOUT);
                    false
                }
            }
        }
        None => false,
    };

    if delivered {
        info!("OTP sent via SMS");
        return Ok(IssuedOtp {
            code: None,
            mode: DeliveryMode::Sms,
        });
    }

    if deps.code_echo_enabled {
        info!("OTP delivery unavailable, echoing code to caller");
        Ok(IssuedOtp {
            code: Some(code),
            mode: DeliveryMode::Console,
        })
    } else {
        // Code stays server-side; the caller must re-request once a
        // delivery channel exists.
        debug!(code = %code, "OTP delivery unavailable and code echo disabled");
        Ok(IssuedOtp {
            code: None,
            mode: DeliveryMode::Console,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::kernel::{MockSmsDelivery, TestDependencies};

    #[test]
    fn test_generated_codes_are_six_digits_without_leading_zero() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(
                code.as_bytes()[0],
                b'0',
                "Leading zero should be impossible by construction"
            );
        }
    }

    #[tokio::test]
    async fn test_issue_stores_code_under_normalized_key() {
        let deps = TestDependencies::new().with_code_echo().build();

        let issued = issue_otp("555-0100".to_string(), &deps).await.unwrap();
        let code = issued.code.expect("echo mode returns the code");

        let entry = deps
            .otp_store
            .take("5550100")
            .await
            .expect("entry should be stored under the normalized key");
        assert_eq!(entry.code, code);
    }

    #[tokio::test]
    async fn test_issue_delivers_via_sms_and_withholds_code() {
        let delivery = Arc::new(MockSmsDelivery::new());
        let deps = TestDependencies::new()
            .with_delivery(delivery.clone())
            .with_code_echo()
            .build();

        let issued = issue_otp("+1 (555) 010-0000".to_string(), &deps).await.unwrap();

        assert_eq!(issued.mode, DeliveryMode::Sms);
        assert!(
            issued.code.is_none(),
            "Code went out-of-band, not in the response"
        );

        let calls = delivery.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "+15550100000", "Delivery goes to the normalized number");
        assert_eq!(calls[0].1.len(), 6);
    }

    #[tokio::test]
    async fn test_delivery_failure_falls_back_to_console_mode() {
        let delivery = Arc::new(MockSmsDelivery::failing());
        let deps = TestDependencies::new()
            .with_delivery(delivery.clone())
            .with_code_echo()
            .build();

        let issued = issue_otp("5550100".to_string(), &deps).await.unwrap();

        assert_eq!(issued.mode, DeliveryMode::Console);
        assert!(issued.code.is_some(), "Echo flag exposes the fallback code");
        assert!(delivery.was_sent_to("5550100"), "Delivery was attempted first");
        // Issuance still stored the code despite the failed send.
        assert!(deps.otp_store.take("5550100").await.is_some());
    }

    #[tokio::test]
    async fn test_echo_disabled_keeps_code_server_side() {
        let deps = TestDependencies::new().build();

        let issued = issue_otp("5550100".to_string(), &deps).await.unwrap();

        assert_eq!(issued.mode, DeliveryMode::Console);
        assert!(issued.code.is_none());
        assert!(
            deps.otp_store.take("5550100").await.is_some(),
            "Code is stored even when not exposed"
        );
    }

    #[tokio::test]
    async fn test_reissue_overwrites_previous_code() {
        let deps = TestDependencies::new().with_code_echo().build();

        issue_otp("5550100".to_string(), &deps).await.unwrap();
        let second = issue_otp("5550100".to_string(), &deps).await.unwrap();

        assert_eq!(deps.otp_store.len().await, 1);
        let entry = deps.otp_store.take("5550100").await.unwrap();
        assert_eq!(Some(entry.code), second.code, "Only the latest code survives");
    }

    #[test]
    fn test_delivery_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DeliveryMode::Sms).unwrap(),
            serde_json::json!("sms")
        );
        assert_eq!(
            serde_json::to_value(DeliveryMode::Console).unwrap(),
            serde_json::json!("console")
        );
    }
}
