use std::cell::RefCell;
use std::rc::Rc;

use super::config::{AutoConnectConfig, AutoConnectStatus};
use super::environment::Environment;
use crate::connection::{ConnectArgs, ConnectionCoordinator};
use crate::error::DAppKitError;
use crate::session::SessionStore;

/// Why one attempt ended without a connection.
enum Failure {
    /// Retrying cannot help
    Final(DAppKitError),
    /// Wallet rejected the connect
    Rejected(DAppKitError),
}

#[derive(Default)]
struct State {
    config: AutoConnectConfig,
    status: AutoConnectStatus,
    error: Option<DAppKitError>,
    attempts: u32,
    initialized: bool,
}

struct Inner {
    session: SessionStore,
    connection: ConnectionCoordinator,
    environment: Rc<dyn Environment>,
    state: RefCell<State>,
}

/// Clones share state.
#[derive(Clone)]
pub struct AutoConnect {
    inner: Rc<Inner>,
}

impl AutoConnect {
    pub fn new(connection: ConnectionCoordinator, environment: Rc<dyn Environment>, config: AutoConnectConfig) -> Self {
        let this = Self {
            inner: Rc::new(Inner {
                session: connection.session().clone(),
                connection,
                environment,
                state: RefCell::new(State::default()),
            }),
        };
        this.configure(config);
        this
    }

    /// Replace the configuration. Syncs the session's auto-connect flag and,
    /// when preferences or a filter are given, re-lists wallets.
    pub fn configure(&self, config: AutoConnectConfig) {
        let session = &self.inner.session;
        session.enable_auto_connect(config.enabled);
        if let Some(options) = config.list_options() {
            session.refresh_wallets(Some(options));
        }
        let mut state = self.inner.state.borrow_mut();
        if state.status != AutoConnectStatus::Attempting {
            state.status = if config.enabled { AutoConnectStatus::Idle } else { AutoConnectStatus::Disabled };
        }
        state.config = config;
    }

    /// Run the startup sequence once per controller.
    pub async fn initialize(&self) {
        let (enabled, settle_delay) = {
            let mut state = self.inner.state.borrow_mut();
            if state.initialized {
                return;
            }
            state.initialized = true;
            (state.config.enabled, state.config.settle_delay)
        };

        if !enabled {
            self.set_status(AutoConnectStatus::Disabled);
            return;
        }

        let env = &self.inner.environment;
        if env.is_interactive() {
            env.wait_for_load().await;
            env.sleep(settle_delay).await;
        }
        self.run(false).await;
    }

    /// Start a new sequence after a failure. No-op while attempting.
    pub async fn retry(&self) {
        if self.is_attempting() {
            return;
        }
        self.inner.state.borrow_mut().attempts = 0;
        self.run(true).await;
    }

    pub fn reset(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.status = if state.config.enabled { AutoConnectStatus::Idle } else { AutoConnectStatus::Disabled };
            state.error = None;
            state.attempts = 0;
            state.initialized = false;
        }
        self.inner.session.reset_auto_connect_attempted();
    }

    async fn run(&self, ignore_attempted: bool) {
        let session = &self.inner.session;
        if session.is_connected() {
            self.set_status(AutoConnectStatus::Success);
            return;
        }
        if !ignore_attempted && session.auto_connect_attempted() {
            self.set_status(AutoConnectStatus::Failed);
            return;
        }
        session.mark_auto_connect_attempted();

        let config = {
            let mut state = self.inner.state.borrow_mut();
            state.status = AutoConnectStatus::Attempting;
            state.error = None;
            state.attempts = 0;
            state.config.clone()
        };
        let max_attempts = config.max_retries.max(1);

        loop {
            let attempt = {
                let mut state = self.inner.state.borrow_mut();
                state.attempts += 1;
                state.attempts
            };
            tracing::debug!(attempt, "auto-connect attempt");

            let error = match self.attempt().await {
                Ok(()) => {
                    tracing::info!(attempt, "auto-connect succeeded");
                    self.set_status(AutoConnectStatus::Success);
                    return;
                }
                Err(Failure::Final(e)) => {
                    tracing::debug!(error = %e, "auto-connect not possible");
                    self.fail(e);
                    return;
                }
                Err(Failure::Rejected(e)) => e,
            };

            if attempt >= max_attempts {
                tracing::warn!(attempts = attempt, error = %error, "auto-connect gave up");
                self.fail(error);
                return;
            }
            self.inner.state.borrow_mut().error = Some(error);
            self.inner.environment.sleep(config.backoff(attempt)).await;

            if session.is_connected() {
                self.set_status(AutoConnectStatus::Success);
                return;
            }
        }
    }

    async fn attempt(&self) -> Result<(), Failure> {
        let session = &self.inner.session;
        let persistence = session.persistence();
        let record = persistence
            .load()
            .ok_or(Failure::Final(DAppKitError::NoSavedSession))?;

        let Some(wallet) = session.find_wallet(&record.wallet_identifier) else {
            persistence.clear();
            return Err(Failure::Final(DAppKitError::Wallet(format!(
                "wallet {} is not available",
                record.wallet_identifier
            ))));
        };

        let args = ConnectArgs::new(wallet).with_account(record.account_address).silent();
        match self.inner.connection.connect_inner(args, false).await {
            Ok(outcome) if outcome.selected_account.is_none() => {
                session.set_disconnected();
                Err(Failure::Final(DAppKitError::NoAccountsConnected))
            }
            Ok(_) => Ok(()),
            Err(e) => Err(Failure::Rejected(e)),
        }
    }

    fn set_status(&self, status: AutoConnectStatus) {
        self.inner.state.borrow_mut().status = status;
    }

    fn fail(&self, error: DAppKitError) {
        let mut state = self.inner.state.borrow_mut();
        state.status = AutoConnectStatus::Failed;
        state.error = Some(error);
    }

    pub fn status(&self) -> AutoConnectStatus { self.inner.state.borrow().status }
    pub fn error(&self) -> Option<DAppKitError> { self.inner.state.borrow().error.clone() }
    pub fn is_attempting(&self) -> bool { self.status() == AutoConnectStatus::Attempting }
    pub fn has_succeeded(&self) -> bool { self.status() == AutoConnectStatus::Success }
    pub fn has_failed(&self) -> bool { self.status() == AutoConnectStatus::Failed }
    /// Attempts made by the most recent sequence
    pub fn attempts(&self) -> u32 { self.inner.state.borrow().attempts }
    pub fn config(&self) -> AutoConnectConfig { self.inner.state.borrow().config.clone() }
}
