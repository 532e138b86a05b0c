//! DAppKit Configuration - passed from higher layers

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::autoconnect::{AutoConnectConfig, Environment};
use crate::core::DEFAULT_CHAIN_FAMILY;
use crate::persistence::{KeyValueStore, DEFAULT_STORAGE_KEY};
use crate::registry::{WalletFilter, WalletListOptions};
use crate::transaction::ChainExecutor;

/// Kit configuration. Higher layers construct this.
#[derive(Clone)]
pub struct DAppKitConfig {
    /// Application name; names the default file store directory on native hosts
    pub app: String,
    pub chain_family: String,
    pub networks: BTreeMap<String, Rc<dyn ChainExecutor>>,
    pub default_network: String,
    pub storage_key: String,
    pub auto_connect: AutoConnectConfig,
    pub preferred_wallets: Vec<String>,
    pub wallet_filter: Option<WalletFilter>,
    /// Replaces the platform key-value store
    pub storage: Option<Rc<dyn KeyValueStore>>,
    /// Replaces the platform environment
    pub environment: Option<Rc<dyn Environment>>,
}

impl DAppKitConfig {
    pub fn new(default_network: impl Into<String>) -> Self {
        Self {
            app: "dappkit".into(),
            chain_family: DEFAULT_CHAIN_FAMILY.into(),
            networks: BTreeMap::new(),
            default_network: default_network.into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            auto_connect: AutoConnectConfig::default(),
            preferred_wallets: Vec::new(),
            wallet_filter: None,
            storage: None,
            environment: None,
        }
    }
    pub fn with_app(mut self, app: impl Into<String>) -> Self { self.app = app.into(); self }
    pub fn with_network(mut self, name: impl Into<String>, executor: Rc<dyn ChainExecutor>) -> Self {
        self.networks.insert(name.into(), executor);
        self
    }
    pub fn with_chain_family(mut self, family: impl Into<String>) -> Self { self.chain_family = family.into(); self }
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self { self.storage_key = key.into(); self }
    pub fn with_auto_connect(mut self, c: AutoConnectConfig) -> Self { self.auto_connect = c; self }
    pub fn with_preferred_wallets(mut self, names: Vec<String>) -> Self { self.preferred_wallets = names; self }
    pub fn with_wallet_filter(mut self, f: WalletFilter) -> Self { self.wallet_filter = Some(f); self }
    pub fn with_storage(mut self, s: Rc<dyn KeyValueStore>) -> Self { self.storage = Some(s); self }
    pub fn with_environment(mut self, e: Rc<dyn Environment>) -> Self { self.environment = Some(e); self }

    pub fn list_options(&self) -> WalletListOptions {
        WalletListOptions { preferred_wallets: self.preferred_wallets.clone(), wallet_filter: self.wallet_filter.clone() }
    }
}

impl fmt::Debug for DAppKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DAppKitConfig")
            .field("app", &self.app)
            .field("chain_family", &self.chain_family)
            .field("networks", &self.networks.keys().collect::<Vec<_>>())
            .field("default_network", &self.default_network)
            .field("storage_key", &self.storage_key)
            .field("auto_connect", &self.auto_connect)
            .field("preferred_wallets", &self.preferred_wallets)
            .field("wallet_filter", &self.wallet_filter.is_some())
            .field("storage", &self.storage.is_some())
            .field("environment", &self.environment.is_some())
            .finish()
    }
}
