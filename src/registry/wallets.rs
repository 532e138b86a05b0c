//! Registry trait, capability predicates and wallet ordering.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use super::capability::{wallet_identifier, WalletCapability, WalletHandle};
use crate::core::{Feature, Subscription};

/// External wallet discovery source.
pub trait WalletRegistry {
    /// Wallets in registration order
    fn wallets(&self) -> Vec<WalletHandle>;

    /// `on_register` fires after a wallet registers; `on_unregister` receives the removed wallet.
    fn subscribe(&self, on_register: Box<dyn Fn()>, on_unregister: Box<dyn Fn(&WalletHandle)>) -> Subscription;
}

pub type WalletFilter = Rc<dyn Fn(&dyn WalletCapability) -> bool>;

/// Which discovered wallets the session lists, and in what order.
#[derive(Clone, Default)]
pub struct WalletListOptions {
    /// Identifiers or names listed first, in this order
    pub preferred_wallets: Vec<String>,
    pub wallet_filter: Option<WalletFilter>,
}

impl WalletListOptions {
    pub fn with_preferred(mut self, preferred: Vec<String>) -> Self { self.preferred_wallets = preferred; self }
    pub fn with_filter(mut self, filter: WalletFilter) -> Self { self.wallet_filter = Some(filter); self }
}

impl fmt::Debug for WalletListOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletListOptions")
            .field("preferred_wallets", &self.preferred_wallets)
            .field("wallet_filter", &self.wallet_filter.is_some())
            .finish()
    }
}

/// Declares `standard:connect` and `standard:events`.
pub fn has_required_feature_set(wallet: &dyn WalletCapability) -> bool {
    wallet.features().has_required()
}

pub fn supports_feature(wallet: &dyn WalletCapability, feature: &Feature) -> bool {
    wallet.features().contains(feature)
}

pub fn supports_features(wallet: &dyn WalletCapability, features: &[Feature]) -> bool {
    wallet.features().contains_all(features)
}

/// Requires both transaction-signing feature names.
pub fn default_wallet_filter(wallet: &dyn WalletCapability) -> bool {
    supports_features(wallet, &[Feature::SignTransaction, Feature::SignTransactionBlock])
}

/// Usable wallets from the registry, preferred ones first.
pub fn registered_wallets(registry: &dyn WalletRegistry, options: &WalletListOptions) -> Vec<WalletHandle> {
    sort_wallets(registry.wallets(), options)
}

pub fn sort_wallets(wallets: Vec<WalletHandle>, options: &WalletListOptions) -> Vec<WalletHandle> {
    let usable: Vec<WalletHandle> = wallets
        .into_iter()
        .filter(|w| has_required_feature_set(w.as_ref()))
        .filter(|w| options.wallet_filter.as_ref().map_or(true, |f| f(w.as_ref())))
        .collect();

    let matches = |w: &WalletHandle, name: &str| wallet_identifier(w.as_ref()) == name || w.name() == name;

    let mut ordered: Vec<WalletHandle> = Vec::with_capacity(usable.len());
    for name in &options.preferred_wallets {
        if let Some(w) = usable.iter().find(|w| matches(*w, name)) {
            if !ordered.iter().any(|o| Rc::ptr_eq(o, w)) { ordered.push(w.clone()); }
        }
    }

    let preferred: HashSet<&str> = options.preferred_wallets.iter().map(String::as_str).collect();
    ordered.extend(
        usable
            .into_iter()
            .filter(|w| !preferred.contains(wallet_identifier(w.as_ref()).as_str()) && !preferred.contains(w.name())),
    );
    ordered
}

/// Name shown to users; disambiguated with a short id when names collide.
pub fn wallet_display_name(wallet: &dyn WalletCapability, all: &[WalletHandle]) -> String {
    let same_name = all.iter().filter(|w| w.name() == wallet.name()).count();
    if same_name <= 1 {
        return wallet.name().to_string();
    }
    let id: String = wallet.id().unwrap_or("unknown").chars().take(8).collect();
    format!("{} ({})", wallet.name(), id)
}
