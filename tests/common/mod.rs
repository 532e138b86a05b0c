//! Shared fakes for integration tests: wallet, executor, environment.

#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use dappkit::core::features::sui;
use dappkit::registry::{
    AccountsListener, ConnectInput, ConnectOutput, ReportEffectsInput, SignMessageInput, SignPersonalMessageInput,
    SignTransactionInput, SignedBytes, SignedMessage, SignedTransactionBlock,
};
use dappkit::transaction::{DryRunResult, ExecuteTransactionRequest, GasCostSummary};
use dappkit::{
    Account, ChainClient, ChainExecutor, ConnectionCoordinator, DAppKitError, Environment, ExecutionResult, Feature,
    FeatureSet, MemoryStore, Result, SessionPersistence, SessionStore, Subscription, TransactionCoordinator,
    WalletCapability,
};

pub fn sui_account(address: &str) -> Account {
    Account::new(address, vec!["sui:testnet".into()])
}

pub fn eth_account(address: &str) -> Account {
    Account::new(address, vec!["ethereum:1".into()])
}

// =============================================================================
// Wallet
// =============================================================================

pub struct MockWallet {
    pub name: String,
    pub id: Option<String>,
    pub features: FeatureSet,
    pub accounts: RefCell<Vec<Account>>,
    pub supported_intents: Vec<String>,
    /// Reject this many upcoming connects
    pub reject_connects: Cell<u32>,
    pub connect_calls: Cell<u32>,
    pub silent_connects: Cell<u32>,
    pub disconnect_fails: Cell<bool>,
    pub disconnect_calls: Cell<u32>,
    pub report_fails: Cell<bool>,
    pub reports: RefCell<Vec<ReportEffectsInput>>,
    /// JSON the wallet pulled from each lazy transaction
    pub signed_json: RefCell<Vec<String>>,
    pub sign_accounts: RefCell<Vec<String>>,
    listeners: RefCell<Vec<Rc<dyn Fn(Vec<Account>)>>>,
}

impl MockWallet {
    /// Connect, events, disconnect, modern signing and effects reporting.
    pub fn new(name: &str) -> Self {
        Self::with_features(
            name,
            [
                Feature::Connect,
                Feature::Events,
                Feature::Disconnect,
                Feature::SignTransaction,
                Feature::SignTransactionBlock,
                Feature::SignPersonalMessage,
                Feature::ReportTransactionEffects,
            ]
            .into_iter()
            .collect(),
        )
    }

    pub fn with_features(name: &str, features: FeatureSet) -> Self {
        Self {
            name: name.into(),
            id: None,
            features,
            accounts: RefCell::new(Vec::new()),
            supported_intents: vec!["CoinWithBalance".into()],
            reject_connects: Cell::new(0),
            connect_calls: Cell::new(0),
            silent_connects: Cell::new(0),
            disconnect_fails: Cell::new(false),
            disconnect_calls: Cell::new(0),
            report_fails: Cell::new(false),
            reports: RefCell::new(Vec::new()),
            signed_json: RefCell::new(Vec::new()),
            sign_accounts: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self { self.id = Some(id.into()); self }

    pub fn with_accounts(self, accounts: Vec<Account>) -> Self {
        *self.accounts.borrow_mut() = accounts;
        self
    }

    pub fn set_accounts(&self, accounts: Vec<Account>) { *self.accounts.borrow_mut() = accounts; }

    /// Fire `standard:events` change with `accounts`.
    pub fn emit_accounts(&self, accounts: Vec<Account>) {
        self.set_accounts(accounts.clone());
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(accounts.clone());
        }
    }

    pub fn listener_count(&self) -> usize { self.listeners.borrow().len() }
}

#[async_trait(?Send)]
impl WalletCapability for MockWallet {
    fn name(&self) -> &str { &self.name }
    fn id(&self) -> Option<&str> { self.id.as_deref() }
    fn features(&self) -> &FeatureSet { &self.features }
    fn accounts(&self) -> Vec<Account> { self.accounts.borrow().clone() }

    async fn connect(&self, input: ConnectInput) -> Result<ConnectOutput> {
        self.connect_calls.set(self.connect_calls.get() + 1);
        if input.silent {
            self.silent_connects.set(self.silent_connects.get() + 1);
        }
        let pending = self.reject_connects.get();
        if pending > 0 {
            self.reject_connects.set(pending - 1);
            return Err(DAppKitError::Wallet("user rejected the request".into()));
        }
        Ok(ConnectOutput { accounts: self.accounts(), supported_intents: self.supported_intents.clone() })
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnect_calls.set(self.disconnect_calls.get() + 1);
        if self.disconnect_fails.get() {
            return Err(DAppKitError::Wallet("disconnect failed".into()));
        }
        Ok(())
    }

    async fn sign_transaction(&self, input: SignTransactionInput) -> Result<SignedBytes> {
        let json = input.transaction.to_json().await?;
        self.signed_json.borrow_mut().push(json.clone());
        self.sign_accounts.borrow_mut().push(input.account.address.clone());
        Ok(SignedBytes { bytes: format!("bytes:{json}"), signature: format!("sig:{}", input.account.address) })
    }

    async fn sign_transaction_block(&self, input: SignTransactionInput) -> Result<SignedTransactionBlock> {
        let json = input.transaction.to_json().await?;
        self.signed_json.borrow_mut().push(json.clone());
        Ok(SignedTransactionBlock { transaction_block_bytes: format!("block:{json}"), signature: "legacy-sig".into() })
    }

    async fn sign_personal_message(&self, input: SignPersonalMessageInput) -> Result<SignedBytes> {
        Ok(SignedBytes { bytes: hex::encode(&input.message), signature: format!("sig:{}", input.account.address) })
    }

    async fn sign_message(&self, input: SignMessageInput) -> Result<SignedMessage> {
        Ok(SignedMessage { message_bytes: format!("legacy:{}", hex::encode(&input.message)), signature: "legacy-sig".into() })
    }

    async fn report_transaction_effects(&self, input: ReportEffectsInput) -> Result<()> {
        self.reports.borrow_mut().push(input);
        if self.report_fails.get() {
            return Err(DAppKitError::Wallet(format!("{} failed", sui::REPORT_TRANSACTION_EFFECTS)));
        }
        Ok(())
    }

    fn on_accounts_changed(&self, listener: AccountsListener) -> Subscription {
        let listener: Rc<dyn Fn(Vec<Account>)> = Rc::from(listener);
        self.listeners.borrow_mut().push(listener.clone());
        Subscription::noop()
    }
}

// =============================================================================
// Executor
// =============================================================================

pub struct MockExecutor {
    pub requests: RefCell<Vec<ExecuteTransactionRequest>>,
    pub dry_runs: RefCell<Vec<(String, String)>>,
    pub raw_effects: Vec<u8>,
    pub gas: Cell<Option<GasCostSummary>>,
    pub fail: Cell<bool>,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            dry_runs: RefCell::new(Vec::new()),
            raw_effects: vec![1, 2, 3, 4],
            gas: Cell::new(Some(GasCostSummary {
                computation_cost: 1_000_000,
                storage_cost: 2_964_000,
                storage_rebate: 978_120,
                non_refundable_storage_fee: 9_880,
            })),
            fail: Cell::new(false),
        }
    }
}

#[async_trait(?Send)]
impl ChainExecutor for MockExecutor {
    async fn execute_transaction_block(&self, request: ExecuteTransactionRequest) -> Result<ExecutionResult> {
        let raw = request.options.show_raw_effects;
        self.requests.borrow_mut().push(request);
        if self.fail.get() {
            return Err(DAppKitError::network("executor unavailable", Some("testnet".into())));
        }
        Ok(ExecutionResult {
            digest: "7dG2xJ".into(),
            effects: Some(serde_json::json!({ "status": { "status": "success" } })),
            raw_effects: raw.then(|| self.raw_effects.clone()),
            ..Default::default()
        })
    }

    async fn dry_run_transaction_block(&self, transaction: &str, sender: &str) -> Result<DryRunResult> {
        self.dry_runs.borrow_mut().push((transaction.to_string(), sender.to_string()));
        Ok(DryRunResult { gas_used: self.gas.get(), effects: None })
    }
}

// =============================================================================
// Environment
// =============================================================================

#[derive(Default)]
pub struct RecordingEnvironment {
    pub interactive: bool,
    pub loads: Cell<u32>,
    pub sleeps: RefCell<Vec<Duration>>,
}

impl RecordingEnvironment {
    pub fn interactive() -> Self { Self { interactive: true, ..Default::default() } }
}

#[async_trait(?Send)]
impl Environment for RecordingEnvironment {
    fn is_interactive(&self) -> bool { self.interactive }

    async fn wait_for_load(&self) { self.loads.set(self.loads.get() + 1); }

    async fn sleep(&self, duration: Duration) { self.sleeps.borrow_mut().push(duration); }
}

// =============================================================================
// Wiring
// =============================================================================

pub struct Harness {
    pub kv: MemoryStore,
    pub session: SessionStore,
    pub connection: ConnectionCoordinator,
    pub transactions: TransactionCoordinator,
    pub executor: Rc<MockExecutor>,
}

pub fn harness() -> Harness {
    let kv = MemoryStore::new();
    let session = SessionStore::new(SessionPersistence::new(Rc::new(kv.clone())));
    let executor = Rc::new(MockExecutor::default());
    let mut networks: std::collections::BTreeMap<String, Rc<dyn ChainExecutor>> = Default::default();
    networks.insert("testnet".into(), executor.clone());
    let client = ChainClient::new("sui", networks, "testnet").expect("client");
    Harness {
        connection: ConnectionCoordinator::new(session.clone()),
        transactions: TransactionCoordinator::new(session.clone(), client),
        session,
        kv,
        executor,
    }
}
