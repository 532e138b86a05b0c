//! Session Store - single source of truth for the wallet connection
//!
//! Pure state container with explicit, synchronous, infallible mutations.
//! The only side effects are best-effort writes of the persisted session
//! record and notifications to [`SessionStore::watch`] receivers.
//!
//! # State
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `connection_status` | disconnected / connecting / connected |
//! | `wallets` | usable wallets from the registry, preference order |
//! | `current_wallet` | attached wallet, compared by identifier |
//! | `accounts` | wallet accounts in the chain family |
//! | `current_account` | selected account, may be none while connected |
//! | `supported_intents` | negotiated at connect |
//! | `last_connected_*` | cleared only by `set_disconnected` |
//! | `auto_connect_*` | flags read by the auto-connect controller |

mod store;

pub use store::{ConnectionStatus, SessionSnapshot, SessionStore};
