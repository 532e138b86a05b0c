//! dappkit: wallet connection and transaction signing for dApps.
//!
//! # Architecture
//!
//! ```text
//! DAppKit (session context, built once)
//!   │
//!   ├── SessionStore ◀── WalletRegistry events (register / unregister)
//!   │     └── SessionPersistence (KeyValueStore: file, localStorage, memory)
//!   │
//!   ├── ConnectionCoordinator  connect / disconnect / switch_account
//!   │
//!   ├── AutoConnect            silent reconnect with backoff at startup
//!   │     └── Environment (document load, timers)
//!   │
//!   └── TransactionCoordinator sign / execute / report effects
//!         └── ChainClient ── ChainExecutor (external RPC)
//! ```
//!
//! # Operations
//!
//! | Component | Method | Description |
//! |-----------|--------|-------------|
//! | connection | `connect(args)` | Connect a wallet and select an account |
//! | connection | `disconnect()` | Disconnect and forget the session |
//! | connection | `switch_account(addr)` | Select another known account |
//! | auto_connect | `initialize()` | Reconnect the last wallet silently |
//! | transactions | `sign_transaction(args)` | Sign, returning a bound effects reporter |
//! | transactions | `sign_and_execute_transaction(args)` | Sign, execute, report effects |
//! | transactions | `sign_personal_message(args)` | Sign bytes, legacy fallback |
//! | session | `watch()` | Snapshot after every state change |
//!
//! # Features
//!
//! - `native` - Native hosts (file persistence, tokio timers, log subscriber)
//! - `wasm` - Browser (localStorage, document readiness, setTimeout)
//!
//! # Usage
//!
//! ```ignore
//! use dappkit::{ConnectArgs, DAppKit, DAppKitConfig, AutoConnectConfig, SignAndExecuteArgs};
//!
//! let kit = DAppKit::from_config(
//!     DAppKitConfig::new("testnet")
//!         .with_network("testnet", executor)
//!         .with_auto_connect(AutoConnectConfig::enabled()),
//!     registry,
//! )?;
//! kit.initialize().await;
//!
//! if !kit.session().is_connected() {
//!     kit.connection().connect(ConnectArgs::new(wallet)).await?;
//! }
//! let result = kit.transactions().sign_and_execute_transaction(SignAndExecuteArgs::new(tx_json)).await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod autoconnect;
pub mod connection;
pub mod core;
pub mod error;
pub mod kit;
pub mod persistence;
pub mod registry;
pub mod session;
pub mod transaction;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use autoconnect::{AutoConnect, AutoConnectConfig, AutoConnectStatus, Environment, ImmediateEnvironment};
pub use connection::{ConnectArgs, ConnectOutcome, ConnectionCoordinator};
pub use self::core::{Feature, FeatureSet, Subscription};
pub use error::{DAppKitError, ErrorCategory, ErrorSeverity, RecoveryAction, Result};
pub use kit::{DAppKit, DAppKitConfig};
pub use persistence::{KeyValueStore, MemoryStore, PersistedSession, SessionPersistence};
pub use registry::{
    wallet_identifier, Account, MemoryRegistry, WalletCapability, WalletHandle, WalletListOptions, WalletRegistry,
};
pub use session::{ConnectionStatus, SessionSnapshot, SessionStore};
pub use transaction::{
    ChainClient, ChainExecutor, ExecuteOptions, ExecutionResult, GasEstimate, LazyTransaction, SignAndExecuteArgs,
    SignPersonalMessageArgs, SignTransactionArgs, SignedTransaction, TransactionBuilder, TransactionCoordinator,
    TransactionPayload,
};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use autoconnect::TokioEnvironment;
#[cfg(feature = "native")]
pub use persistence::FileStore;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{BrowserEnvironment, LocalStorage};
