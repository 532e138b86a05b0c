//! Persistence Adapter - durable pointer to the last session
//!
//! A single JSON record `{walletIdentifier, accountAddress, timestamp}` kept
//! in a key-value store so auto-connect can find the wallet again.
//!
//! | Store | Platform | Backing |
//! |-------|----------|---------|
//! | [`MemoryStore`] | any | process memory |
//! | [`FileStore`] | native | one JSON file per key under `$DAPPKIT_ROOT/<app>/data` |
//! | `wasm::LocalStorage` | browser | `window.localStorage` |

mod session;
mod store;

pub use session::{PersistedSession, SessionPersistence, DEFAULT_STORAGE_KEY, SESSION_TTL_MS};
#[cfg(feature = "native")]
pub use store::FileStore;
pub use store::{KeyValueStore, MemoryStore};
