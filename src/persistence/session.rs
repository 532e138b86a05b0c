//! SessionPersistence - the TTL-bounded `(wallet, account, timestamp)` record

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use super::store::KeyValueStore;

pub const DEFAULT_STORAGE_KEY: &str = "dappkit:wallet-connection";

/// Records older than 7 days are discarded
pub const SESSION_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(alias = "walletName")]
    pub wallet_identifier: String,
    pub account_address: String,
    /// Epoch millis at save time
    pub timestamp: i64,
}

impl PersistedSession {
    pub fn is_expired_at(&self, now_ms: i64, ttl_ms: i64) -> bool { now_ms - self.timestamp > ttl_ms }
}

/// Reads and writes the record. All failures are logged and swallowed:
/// the record is a convenience pointer, not business data.
#[derive(Clone)]
pub struct SessionPersistence {
    store: Rc<dyn KeyValueStore>,
    key: String,
    ttl_ms: i64,
}

impl SessionPersistence {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store, key: DEFAULT_STORAGE_KEY.into(), ttl_ms: SESSION_TTL_MS }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self { self.key = key.into(); self }
    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self { self.ttl_ms = ttl_ms; self }

    pub fn key(&self) -> &str { &self.key }

    pub fn save(&self, wallet_identifier: &str, account_address: &str) {
        self.save_at(wallet_identifier, account_address, now_ms());
    }

    pub fn save_at(&self, wallet_identifier: &str, account_address: &str, now_ms: i64) {
        let record = PersistedSession {
            wallet_identifier: wallet_identifier.to_string(),
            account_address: account_address.to_string(),
            timestamp: now_ms,
        };
        let result = serde_json::to_string(&record)
            .map_err(crate::error::DAppKitError::from)
            .and_then(|json| self.store.set_item(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save wallet connection info: {}", e);
        }
    }

    pub fn load(&self) -> Option<PersistedSession> { self.load_at(now_ms()) }

    /// Expired records are removed and reported as absent.
    pub fn load_at(&self, now_ms: i64) -> Option<PersistedSession> {
        let raw = match self.store.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to load wallet connection info: {}", e);
                return None;
            }
        };
        let record: PersistedSession = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to parse wallet connection info: {}", e);
                return None;
            }
        };
        if record.is_expired_at(now_ms, self.ttl_ms) {
            tracing::debug!(wallet = %record.wallet_identifier, "persisted session expired");
            self.clear();
            return None;
        }
        Some(record)
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove_item(&self.key) {
            tracing::warn!("Failed to clear wallet connection info: {}", e);
        }
    }
}

impl fmt::Debug for SessionPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionPersistence").field("key", &self.key).field("ttl_ms", &self.ttl_ms).finish()
    }
}

fn now_ms() -> i64 { chrono::Utc::now().timestamp_millis() }
