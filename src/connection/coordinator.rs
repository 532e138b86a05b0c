use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::core::busy::BusyGuard;
use crate::core::features::standard;
use crate::core::{in_chain_family, Feature};
use crate::error::{DAppKitError, Result};
use crate::registry::{wallet_identifier, Account, ConnectInput, WalletHandle};
use crate::session::{ConnectionStatus, SessionStore};

#[derive(Clone)]
pub struct ConnectArgs {
    pub wallet: WalletHandle,
    /// Preferred account; falls back to the first account in the chain family
    pub account_address: Option<String>,
    /// Must not prompt the user
    pub silent: bool,
}

impl ConnectArgs {
    pub fn new(wallet: WalletHandle) -> Self { Self { wallet, account_address: None, silent: false } }
    pub fn with_account(mut self, address: impl Into<String>) -> Self { self.account_address = Some(address.into()); self }
    pub fn silent(mut self) -> Self { self.silent = true; self }
}

impl fmt::Debug for ConnectArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectArgs")
            .field("wallet", &wallet_identifier(self.wallet.as_ref()))
            .field("account_address", &self.account_address)
            .field("silent", &self.silent)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// Accounts in the chain family
    pub accounts: Vec<Account>,
    pub selected_account: Option<Account>,
}

struct Inner {
    session: SessionStore,
    connecting: Cell<bool>,
    error: RefCell<Option<DAppKitError>>,
}

#[derive(Clone)]
pub struct ConnectionCoordinator {
    inner: Rc<Inner>,
}

impl ConnectionCoordinator {
    pub fn new(session: SessionStore) -> Self {
        Self { inner: Rc::new(Inner { session, connecting: Cell::new(false), error: RefCell::new(None) }) }
    }

    pub fn session(&self) -> &SessionStore { &self.inner.session }

    /// Connect `args.wallet`. On failure the session goes back to
    /// disconnected and the error is kept in [`error`](Self::error).
    pub async fn connect(&self, args: ConnectArgs) -> Result<ConnectOutcome> { self.connect_inner(args, true).await }

    /// Shared connect path. Background callers pass `interactive = false` so
    /// neither [`is_connecting`](Self::is_connecting) nor the error slot moves.
    pub(crate) async fn connect_inner(&self, args: ConnectArgs, interactive: bool) -> Result<ConnectOutcome> {
        let ConnectArgs { wallet, account_address, silent } = args;
        if !wallet.features().contains(&Feature::Connect) {
            return Err(DAppKitError::FeatureNotSupported(standard::CONNECT.into()));
        }

        let session = &self.inner.session;
        let _busy = interactive.then(|| BusyGuard::hold(&self.inner.connecting));
        if interactive {
            self.inner.error.replace(None);
        }
        session.set_connection_status(ConnectionStatus::Connecting);
        tracing::debug!(wallet = wallet.name(), silent, "connecting");

        let output = match wallet.connect(ConnectInput { silent }).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(wallet = wallet.name(), error = %e, "connect failed");
                session.set_connection_status(ConnectionStatus::Disconnected);
                if interactive {
                    *self.inner.error.borrow_mut() = Some(e.clone());
                }
                return Err(e);
            }
        };

        let family = session.chain_family().to_string();
        let accounts: Vec<Account> =
            output.accounts.into_iter().filter(|a| in_chain_family(&a.chains, &family)).collect();
        let selected_account = account_address
            .as_deref()
            .and_then(|addr| accounts.iter().find(|a| a.address == addr))
            .or_else(|| accounts.first())
            .cloned();

        session.set_connected(wallet, accounts.clone(), selected_account.clone(), output.supported_intents);
        Ok(ConnectOutcome { accounts, selected_account })
    }

    /// Best-effort `standard:disconnect`, then clear the session.
    pub async fn disconnect(&self) -> Result<()> {
        let wallet = self.inner.session.current_wallet().ok_or(DAppKitError::NotConnected)?;
        if wallet.features().contains(&Feature::Disconnect) {
            if let Err(e) = wallet.disconnect().await {
                tracing::warn!(wallet = wallet.name(), error = %e, "wallet disconnect failed");
            }
        }
        self.inner.session.set_disconnected();
        Ok(())
    }

    /// Select one of the session's known accounts by address.
    pub fn switch_account(&self, address: &str) -> Result<()> {
        let session = &self.inner.session;
        if session.current_wallet().is_none() {
            return Err(DAppKitError::NotConnected);
        }
        let account = session
            .accounts()
            .into_iter()
            .find(|a| a.address == address)
            .ok_or_else(|| DAppKitError::AccountNotFound(address.to_string()))?;
        session.switch_account(account);
        Ok(())
    }

    pub fn is_connecting(&self) -> bool { self.inner.connecting.get() }

    pub fn error(&self) -> Option<DAppKitError> { self.inner.error.borrow().clone() }

    pub fn clear_error(&self) { self.inner.error.replace(None); }
}
