//! SessionStore: shared handle over the session state (single-threaded).

use futures::channel::mpsc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::{in_chain_family, Subscription, DEFAULT_CHAIN_FAMILY};
use crate::persistence::SessionPersistence;
use crate::registry::{registered_wallets, wallet_identifier, Account, WalletHandle, WalletListOptions, WalletRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        }
    }
}

/// Point-in-time copy of the session, sent to watchers after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub connection_status: ConnectionStatus,
    /// Identifiers of the listed wallets
    pub wallets: Vec<String>,
    pub current_wallet: Option<String>,
    pub accounts: Vec<Account>,
    pub current_account: Option<Account>,
    pub supported_intents: Vec<String>,
    pub last_connected_wallet_name: Option<String>,
    pub last_connected_account_address: Option<String>,
    pub auto_connect_enabled: bool,
    pub auto_connect_attempted: bool,
}

#[derive(Default)]
struct SessionState {
    status: ConnectionStatus,
    wallets: Vec<WalletHandle>,
    current_wallet: Option<WalletHandle>,
    accounts: Vec<Account>,
    current_account: Option<Account>,
    supported_intents: Vec<String>,
    last_connected_wallet_name: Option<String>,
    last_connected_account_address: Option<String>,
    auto_connect_enabled: bool,
    auto_connect_attempted: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            connection_status: self.status,
            wallets: self.wallets.iter().map(|w| wallet_identifier(w.as_ref())).collect(),
            current_wallet: self.current_wallet.as_ref().map(|w| wallet_identifier(w.as_ref())),
            accounts: self.accounts.clone(),
            current_account: self.current_account.clone(),
            supported_intents: self.supported_intents.clone(),
            last_connected_wallet_name: self.last_connected_wallet_name.clone(),
            last_connected_account_address: self.last_connected_account_address.clone(),
            auto_connect_enabled: self.auto_connect_enabled,
            auto_connect_attempted: self.auto_connect_attempted,
        }
    }

    fn select(&mut self, account: Account) {
        self.last_connected_account_address = Some(account.address.clone());
        self.current_account = Some(account);
    }
}

struct RegistryLink {
    registry: Rc<dyn WalletRegistry>,
    options: WalletListOptions,
    subscription: Subscription,
}

struct Inner {
    state: RefCell<SessionState>,
    persistence: SessionPersistence,
    chain_family: String,
    watchers: RefCell<Vec<mpsc::UnboundedSender<SessionSnapshot>>>,
    account_events: RefCell<Option<Subscription>>,
    registry: RefCell<Option<RegistryLink>>,
}

/// Session state shared by the coordinators. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    pub fn new(persistence: SessionPersistence) -> Self { Self::with_chain_family(persistence, DEFAULT_CHAIN_FAMILY) }

    pub fn with_chain_family(persistence: SessionPersistence, chain_family: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(SessionState::default()),
                persistence,
                chain_family: chain_family.into(),
                watchers: RefCell::new(Vec::new()),
                account_events: RefCell::new(None),
                registry: RefCell::new(None),
            }),
        }
    }

    fn from_weak(weak: &Weak<Inner>) -> Option<Self> { weak.upgrade().map(|inner| Self { inner }) }

    /// Receives a snapshot after every mutation. Drop the receiver to unsubscribe.
    pub fn watch(&self) -> mpsc::UnboundedReceiver<SessionSnapshot> {
        let (tx, rx) = mpsc::unbounded();
        self.inner.watchers.borrow_mut().push(tx);
        rx
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.inner.watchers.borrow_mut().retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }

    pub fn snapshot(&self) -> SessionSnapshot { self.inner.state.borrow().snapshot() }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_connection_status(&self, status: ConnectionStatus) {
        self.inner.state.borrow_mut().status = status;
        tracing::debug!(status = status.as_str(), "connection status");
        self.notify();
    }

    /// Attach `wallet` with its family-filtered accounts. Persists the pointer
    /// when an account is selected and follows the wallet's account changes.
    pub fn set_connected(
        &self,
        wallet: WalletHandle,
        accounts: Vec<Account>,
        selected_account: Option<Account>,
        supported_intents: Vec<String>,
    ) {
        let wallet_id = wallet_identifier(wallet.as_ref());
        {
            let mut state = self.inner.state.borrow_mut();
            state.current_wallet = Some(wallet.clone());
            state.accounts = accounts;
            state.current_account = selected_account.clone();
            state.status = ConnectionStatus::Connected;
            state.supported_intents = supported_intents;
            state.last_connected_wallet_name = Some(wallet_id.clone());
            state.last_connected_account_address = selected_account.as_ref().map(|a| a.address.clone());
        }

        if let Some(account) = &selected_account {
            self.inner.persistence.save(&wallet_id, &account.address);
        }

        let weak = Rc::downgrade(&self.inner);
        let family = self.inner.chain_family.clone();
        let source = wallet_id.clone();
        let subscription = wallet.on_accounts_changed(Box::new(move |accounts: Vec<Account>| {
            if let Some(store) = SessionStore::from_weak(&weak) {
                // Wallets may keep emitting after unsubscribe
                if store.current_wallet_identifier().as_deref() != Some(source.as_str()) {
                    tracing::debug!(wallet = %source, "ignoring accounts from detached wallet");
                    return;
                }
                let accounts = accounts.into_iter().filter(|a| in_chain_family(&a.chains, &family)).collect();
                store.update_accounts(accounts);
            }
        }));
        if let Some(previous) = self.inner.account_events.borrow_mut().replace(subscription) {
            previous.unsubscribe();
        }

        tracing::info!(wallet = %wallet_id, account = ?selected_account.as_ref().map(|a| &a.address), "wallet connected");
        self.notify();
    }

    /// Detach the wallet, forget last-connected identifiers, clear persistence.
    pub fn set_disconnected(&self) {
        let previous = self.inner.account_events.borrow_mut().take();
        if let Some(previous) = previous {
            previous.unsubscribe();
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.current_wallet = None;
            state.accounts.clear();
            state.current_account = None;
            state.status = ConnectionStatus::Disconnected;
            state.supported_intents.clear();
            state.last_connected_wallet_name = None;
            state.last_connected_account_address = None;
        }
        self.inner.persistence.clear();
        tracing::info!("wallet disconnected");
        self.notify();
    }

    /// Select `account`. The caller guarantees membership in [`accounts`](Self::accounts).
    pub fn switch_account(&self, account: Account) {
        let address = account.address.clone();
        let wallet_id = {
            let mut state = self.inner.state.borrow_mut();
            state.select(account);
            state.current_wallet.as_ref().map(|w| wallet_identifier(w.as_ref()))
        };
        if let Some(wallet_id) = wallet_id {
            self.inner.persistence.save(&wallet_id, &address);
        }
        tracing::debug!(account = %address, "account switched");
        self.notify();
    }

    /// Replace the account list. A vanished selection falls back to the first
    /// account, or to none while staying connected. No-op without a wallet.
    pub fn update_accounts(&self, accounts: Vec<Account>) {
        let promoted = {
            let mut state = self.inner.state.borrow_mut();
            if state.current_wallet.is_none() {
                return;
            }
            let current = state.current_account.as_ref().map(|a| a.address.clone());
            let still_exists = current.as_ref().map_or(false, |addr| accounts.iter().any(|a| &a.address == addr));
            let first = accounts.first().cloned();
            state.accounts = accounts;
            if still_exists {
                None
            } else if let Some(first) = first {
                state.select(first.clone());
                state.current_wallet.as_ref().map(|w| (wallet_identifier(w.as_ref()), first.address))
            } else {
                state.current_account = None;
                None
            }
        };
        if let Some((wallet_id, address)) = promoted {
            self.inner.persistence.save(&wallet_id, &address);
        }
        self.notify();
    }

    pub fn enable_auto_connect(&self, enabled: bool) {
        self.inner.state.borrow_mut().auto_connect_enabled = enabled;
        self.notify();
    }

    pub fn mark_auto_connect_attempted(&self) {
        self.inner.state.borrow_mut().auto_connect_attempted = true;
        self.notify();
    }

    pub fn reset_auto_connect_attempted(&self) {
        self.inner.state.borrow_mut().auto_connect_attempted = false;
        self.notify();
    }

    pub fn set_wallets(&self, wallets: Vec<WalletHandle>) {
        self.inner.state.borrow_mut().wallets = wallets;
        self.notify();
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// List wallets from `registry` and follow its register/unregister events.
    /// Unregistering the attached wallet disconnects the session.
    pub fn attach_registry(&self, registry: Rc<dyn WalletRegistry>, options: WalletListOptions) {
        let on_register = {
            let weak = Rc::downgrade(&self.inner);
            Box::new(move || {
                if let Some(store) = SessionStore::from_weak(&weak) { store.refresh_wallets(None); }
            })
        };
        let on_unregister = {
            let weak = Rc::downgrade(&self.inner);
            Box::new(move |wallet: &WalletHandle| {
                if let Some(store) = SessionStore::from_weak(&weak) {
                    let removed = wallet_identifier(wallet.as_ref());
                    if store.current_wallet_identifier().as_deref() == Some(removed.as_str()) {
                        tracing::info!(wallet = %removed, "connected wallet unregistered");
                        store.set_disconnected();
                    }
                    store.refresh_wallets(None);
                }
            })
        };
        let subscription = registry.subscribe(on_register, on_unregister);
        let previous = self.inner.registry.borrow_mut().replace(RegistryLink { registry, options, subscription });
        if let Some(previous) = previous {
            previous.subscription.unsubscribe();
        }
        self.refresh_wallets(None);
    }

    /// Re-enumerate the attached registry, optionally with new list options.
    pub fn refresh_wallets(&self, options: Option<WalletListOptions>) {
        let (registry, options) = {
            let mut link = self.inner.registry.borrow_mut();
            let Some(link) = link.as_mut() else { return };
            if let Some(options) = options {
                link.options = options;
            }
            (link.registry.clone(), link.options.clone())
        };
        let wallets = registered_wallets(registry.as_ref(), &options);
        self.set_wallets(wallets);
    }

    pub fn detach_registry(&self) {
        let link = self.inner.registry.borrow_mut().take();
        if let Some(link) = link {
            link.subscription.unsubscribe();
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn status(&self) -> ConnectionStatus { self.inner.state.borrow().status }
    pub fn is_connected(&self) -> bool { self.status() == ConnectionStatus::Connected }
    pub fn is_connecting(&self) -> bool { self.status() == ConnectionStatus::Connecting }
    pub fn is_disconnected(&self) -> bool { self.status() == ConnectionStatus::Disconnected }
    pub fn wallets(&self) -> Vec<WalletHandle> { self.inner.state.borrow().wallets.clone() }
    pub fn current_wallet(&self) -> Option<WalletHandle> { self.inner.state.borrow().current_wallet.clone() }
    pub fn accounts(&self) -> Vec<Account> { self.inner.state.borrow().accounts.clone() }
    pub fn current_account(&self) -> Option<Account> { self.inner.state.borrow().current_account.clone() }
    pub fn supported_intents(&self) -> Vec<String> { self.inner.state.borrow().supported_intents.clone() }
    pub fn auto_connect_enabled(&self) -> bool { self.inner.state.borrow().auto_connect_enabled }
    pub fn auto_connect_attempted(&self) -> bool { self.inner.state.borrow().auto_connect_attempted }
    pub fn chain_family(&self) -> &str { &self.inner.chain_family }
    pub fn persistence(&self) -> &SessionPersistence { &self.inner.persistence }

    pub fn last_connected_wallet_name(&self) -> Option<String> {
        self.inner.state.borrow().last_connected_wallet_name.clone()
    }

    pub fn last_connected_account_address(&self) -> Option<String> {
        self.inner.state.borrow().last_connected_account_address.clone()
    }

    pub fn current_wallet_identifier(&self) -> Option<String> {
        self.inner.state.borrow().current_wallet.as_ref().map(|w| wallet_identifier(w.as_ref()))
    }

    /// Listed wallet with this identifier, else with this name
    pub fn find_wallet(&self, identifier: &str) -> Option<WalletHandle> {
        let state = self.inner.state.borrow();
        state
            .wallets
            .iter()
            .find(|w| wallet_identifier(w.as_ref()) == identifier)
            .or_else(|| state.wallets.iter().find(|w| w.name() == identifier))
            .cloned()
    }
}
