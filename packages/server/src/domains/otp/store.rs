//! Keyed storage of one-time codes with expiry semantics.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use super::models::OtpEntry;

/// In-memory store of live one-time codes, keyed by normalized phone number.
///
/// Constructed once and injected through `ServerDeps` - never a module-level
/// singleton - so tests get isolated stores and a multi-instance deployment
/// can put a networked backing store behind the same interface.
///
/// At most one live entry exists per key: a new `put` overwrites any
/// outstanding entry. Entries do not survive a restart; codes are
/// short-lived and resending is cheap.
#[derive(Default)]
pub struct OtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `key`, stamped with `created_at =
    /// now` and `expires_at = now + ttl`. Overwriting invalidates any code
    /// still outstanding for the key.
    pub async fn put(&self, key: &str, code: String, ttl: Duration) {
        let now = Utc::now();
        let entry = OtpEntry {
            code,
            created_at: now,
            expires_at: now + chrono::Duration::milliseconds(ttl.as_millis() as i64),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
    }

    /// Atomically remove and return the entry for `key`, regardless of its
    /// expiry state. Of two concurrent callers, exactly one observes the
    /// entry - this is the mechanism that makes codes single-use. No
    /// non-destructive read is exposed to verification.
    pub async fn take(&self, key: &str) -> Option<OtpEntry> {
        self.entries.lock().await.remove(key)
    }

    /// Remove entries whose own expiry instant has passed, returning how
    /// many were removed. The decision is keyed off each entry's stored
    /// `expires_at`, so an entry refreshed by a newer `put` is never a
    /// casualty of a sweep that started earlier.
    pub async fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of entries currently held (live or awaiting sweep).
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_put_then_take_returns_entry() {
        let store = OtpStore::new();
        store.put("+15550100", "123456".to_string(), TTL).await;

        let entry = store.take("+15550100").await.expect("entry should exist");
        assert_eq!(entry.code, "123456");
    }

    #[tokio::test]
    async fn test_take_consumes_entry() {
        let store = OtpStore::new();
        store.put("+15550100", "123456".to_string(), TTL).await;

        assert!(store.take("+15550100").await.is_some());
        assert!(
            store.take("+15550100").await.is_none(),
            "Second take should observe absent"
        );
    }

    #[tokio::test]
    async fn test_take_unknown_key_is_absent() {
        let store = OtpStore::new();
        assert!(store.take("+15550100").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_entry() {
        let store = OtpStore::new();
        store.put("+15550100", "111111".to_string(), TTL).await;
        store.put("+15550100", "222222".to_string(), TTL).await;

        assert_eq!(store.len().await, 1, "Overwrite should not add a second entry");
        let entry = store.take("+15550100").await.unwrap();
        assert_eq!(entry.code, "222222", "Latest put wins");
    }

    #[tokio::test]
    async fn test_take_returns_expired_entry_for_caller_to_classify() {
        let store = OtpStore::new();
        store
            .put("+15550100", "123456".to_string(), Duration::ZERO)
            .await;

        let entry = store.take("+15550100").await.expect("take ignores expiry");
        assert!(entry.is_expired(Utc::now()));
        assert!(store.take("+15550100").await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_entries() {
        let store = OtpStore::new();
        store
            .put("+15550100", "111111".to_string(), Duration::ZERO)
            .await;
        store.put("+15550111", "222222".to_string(), TTL).await;

        let removed = store.sweep_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.take("+15550111").await.is_some());
    }

    #[tokio::test]
    async fn test_sweep_spares_freshly_overwritten_entry() {
        let store = OtpStore::new();
        store
            .put("+15550100", "111111".to_string(), Duration::ZERO)
            .await;
        // Re-issue refreshes the expiry before the sweep runs.
        store.put("+15550100", "222222".to_string(), TTL).await;

        let removed = store.sweep_expired().await;
        assert_eq!(removed, 0, "Sweep keys off the entry's own expiry");
        assert_eq!(store.take("+15550100").await.unwrap().code, "222222");
    }

    #[tokio::test]
    async fn test_len_and_is_empty() {
        let store = OtpStore::new();
        assert!(store.is_empty().await);

        store.put("+15550100", "123456".to_string(), TTL).await;
        assert_eq!(store.len().await, 1);
        assert!(!store.is_empty().await);
    }
}
