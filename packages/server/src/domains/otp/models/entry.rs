use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored one-time code.
///
/// Entries are owned exclusively by the store: replaced wholesale on
/// re-issuance, removed on the first verification attempt. Timestamps
/// serialize as epoch milliseconds so a durable backing store records
/// absolute expiry instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpEntry {
    pub code: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl OtpEntry {
    /// Whether this entry's own expiry instant has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
