//! Capability Registry Adapter - wallets discovered by an external registry
//!
//! The registry (wallet-standard `getWallets()` in browsers, an in-process
//! [`MemoryRegistry`] elsewhere) is an external collaborator. This module
//! defines what is consumed from it and the predicates used to pick wallets.
//!
//! # Architecture
//!
//! ```text
//! WalletRegistry (external)
//!     │  wallets(), subscribe(on_register, on_unregister)
//!     ▼
//! registered_wallets(options)  ── has_required_feature_set + filter + preference order
//!     │
//!     ▼
//! SessionStore.wallets
//! ```
//!
//! # Wallet Features
//!
//! | Feature | Operation | Required |
//! |---------|-----------|----------|
//! | `standard:connect` | `connect({silent})` | yes |
//! | `standard:events` | `on_accounts_changed` | yes |
//! | `standard:disconnect` | `disconnect()` | no |
//! | `sui:signTransaction` / `sui:signTransactionBlock` | sign | no |
//! | `sui:signPersonalMessage` / `sui:signMessage` | sign message | no |
//! | `sui:reportTransactionEffects` | report effects | no |

mod capability;
mod memory;
mod wallets;

pub use capability::{
    wallet_identifier, Account, AccountsListener, ConnectInput, ConnectOutput, ReportEffectsInput,
    SignMessageInput, SignPersonalMessageInput, SignTransactionInput, SignedBytes, SignedMessage,
    SignedTransactionBlock, WalletCapability, WalletHandle,
};
pub use memory::MemoryRegistry;
pub use wallets::{
    default_wallet_filter, has_required_feature_set, registered_wallets, sort_wallets, supports_feature,
    supports_features, wallet_display_name, WalletFilter, WalletListOptions, WalletRegistry,
};
