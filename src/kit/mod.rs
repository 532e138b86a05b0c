//! DAppKit - the session context
//!
//! Built once at application start and passed by reference. Owns the session
//! store and hands out the coordinators that share it; there is no global
//! state.
//!
//! ```text
//! DAppKitConfig + WalletRegistry
//!         │ from_config
//!         ▼
//!      DAppKit ─┬─ SessionStore ◀── registry events, persistence
//!               ├─ ConnectionCoordinator
//!               ├─ TransactionCoordinator ── ChainClient
//!               └─ AutoConnect ── Environment
//! ```

mod config;

pub use config::DAppKitConfig;

use std::rc::Rc;

use crate::autoconnect::{AutoConnect, Environment};
use crate::connection::ConnectionCoordinator;
use crate::error::Result;
use crate::persistence::{KeyValueStore, SessionPersistence};
use crate::registry::WalletRegistry;
use crate::session::SessionStore;
use crate::transaction::{ChainClient, TransactionCoordinator};

pub struct DAppKit {
    session: SessionStore,
    connection: ConnectionCoordinator,
    transactions: TransactionCoordinator,
    auto_connect: AutoConnect,
    client: ChainClient,
}

impl DAppKit {
    /// Wire every component from config. Fails when the default network has no executor.
    pub fn from_config(config: DAppKitConfig, registry: Rc<dyn WalletRegistry>) -> Result<Self> {
        let client = ChainClient::new(&config.chain_family, config.networks.clone(), &config.default_network)?;

        let storage = match config.storage.clone() {
            Some(storage) => storage,
            None => default_storage(&config.app)?,
        };
        let environment = config.environment.clone().unwrap_or_else(default_environment);

        let persistence = SessionPersistence::new(storage).with_key(&config.storage_key);
        let session = SessionStore::with_chain_family(persistence, &config.chain_family);
        session.attach_registry(registry, config.list_options());

        let connection = ConnectionCoordinator::new(session.clone());
        let transactions = TransactionCoordinator::new(session.clone(), client.clone());
        let auto_connect = AutoConnect::new(connection.clone(), environment, config.auto_connect);

        tracing::debug!(app = %config.app, chain = %client.chain(), "dappkit ready");
        Ok(Self { session, connection, transactions, auto_connect, client })
    }

    /// Run auto-connect once. Outcome is on [`auto_connect`](Self::auto_connect).
    pub async fn initialize(&self) { self.auto_connect.initialize().await; }

    pub fn session(&self) -> &SessionStore { &self.session }
    pub fn connection(&self) -> &ConnectionCoordinator { &self.connection }
    pub fn transactions(&self) -> &TransactionCoordinator { &self.transactions }
    pub fn auto_connect(&self) -> &AutoConnect { &self.auto_connect }
    pub fn client(&self) -> &ChainClient { &self.client }

    /// Stop following registry events.
    pub fn close(&self) { self.session.detach_registry(); }
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
fn default_storage(_app: &str) -> Result<Rc<dyn KeyValueStore>> {
    Ok(Rc::new(crate::wasm::LocalStorage::new()?))
}

#[cfg(all(feature = "native", not(all(feature = "wasm", target_arch = "wasm32"))))]
fn default_storage(app: &str) -> Result<Rc<dyn KeyValueStore>> {
    Ok(Rc::new(crate::persistence::FileStore::for_app(app)))
}

#[cfg(not(any(feature = "native", all(feature = "wasm", target_arch = "wasm32"))))]
fn default_storage(_app: &str) -> Result<Rc<dyn KeyValueStore>> {
    Ok(Rc::new(crate::persistence::MemoryStore::new()))
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
fn default_environment() -> Rc<dyn Environment> { Rc::new(crate::wasm::BrowserEnvironment) }

#[cfg(all(feature = "native", not(all(feature = "wasm", target_arch = "wasm32"))))]
fn default_environment() -> Rc<dyn Environment> { Rc::new(crate::autoconnect::TokioEnvironment) }

#[cfg(not(any(feature = "native", all(feature = "wasm", target_arch = "wasm32"))))]
fn default_environment() -> Rc<dyn Environment> { Rc::new(crate::autoconnect::ImmediateEnvironment) }
