//! TransactionCoordinator - signing, execution and effects reporting.

use base64::Engine;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::client::ChainClient;
use super::executor::{ExecuteOptions, ExecuteTransactionRequest, ExecutionResult, GasEstimate};
use super::payload::{BuildContext, LazyTransaction, TransactionPayload};
use crate::core::features::sui;
use crate::core::busy::BusyGuard;
use crate::core::Feature;
use crate::error::{DAppKitError, Result};
use crate::registry::{
    Account, ReportEffectsInput, SignMessageInput, SignPersonalMessageInput, SignTransactionInput, SignedBytes,
    WalletHandle,
};
use crate::session::SessionStore;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Clone, Debug)]
pub struct SignTransactionArgs {
    pub transaction: TransactionPayload,
    /// Overrides the session's current account
    pub account: Option<Account>,
    /// Overrides the active `family:network`
    pub chain: Option<String>,
}

impl SignTransactionArgs {
    pub fn new(transaction: impl Into<TransactionPayload>) -> Self {
        Self { transaction: transaction.into(), account: None, chain: None }
    }
    pub fn with_account(mut self, account: Account) -> Self { self.account = Some(account); self }
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self { self.chain = Some(chain.into()); self }
}

#[derive(Clone, Debug)]
pub struct SignAndExecuteArgs {
    pub sign: SignTransactionArgs,
    /// `show_raw_effects` is always forced on
    pub options: ExecuteOptions,
}

impl SignAndExecuteArgs {
    pub fn new(transaction: impl Into<TransactionPayload>) -> Self {
        Self { sign: SignTransactionArgs::new(transaction), options: ExecuteOptions::default() }
    }
    pub fn with_account(mut self, account: Account) -> Self { self.sign = self.sign.with_account(account); self }
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self { self.sign = self.sign.with_chain(chain); self }
    pub fn with_options(mut self, options: ExecuteOptions) -> Self { self.options = options; self }
}

#[derive(Clone, Debug)]
pub struct SignPersonalMessageArgs {
    pub message: Vec<u8>,
    pub account: Option<Account>,
    pub chain: Option<String>,
}

impl SignPersonalMessageArgs {
    pub fn new(message: impl Into<Vec<u8>>) -> Self { Self { message: message.into(), account: None, chain: None } }
    pub fn with_account(mut self, account: Account) -> Self { self.account = Some(account); self }
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self { self.chain = Some(chain.into()); self }
}

// =============================================================================
// Signed envelope
// =============================================================================

/// Signed transaction bytes plus a reporter bound to the account and chain
/// that were active when it was signed.
pub struct SignedTransaction {
    pub bytes: String,
    pub signature: String,
    account: Account,
    chain: String,
    coordinator: TransactionCoordinator,
}

impl SignedTransaction {
    pub fn account(&self) -> &Account { &self.account }
    pub fn chain(&self) -> &str { &self.chain }

    /// Report base64 raw effects for this transaction. Best-effort.
    pub async fn report_transaction_effects(&self, effects: &str) {
        self.coordinator.report_transaction_effects(effects, &self.account, &self.chain).await;
    }
}

impl fmt::Debug for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedTransaction")
            .field("bytes", &self.bytes)
            .field("signature", &self.signature)
            .field("account", &self.account.address)
            .field("chain", &self.chain)
            .finish()
    }
}

// =============================================================================
// Busy flags and error slots
// =============================================================================

#[derive(Default)]
struct Slots {
    signing_transaction: Cell<bool>,
    executing_transaction: Cell<bool>,
    signing_message: Cell<bool>,
    sign_transaction_error: RefCell<Option<DAppKitError>>,
    execute_transaction_error: RefCell<Option<DAppKitError>>,
    sign_message_error: RefCell<Option<DAppKitError>>,
}

fn record<T>(slot: &RefCell<Option<DAppKitError>>, result: &Result<T>) {
    if let Err(e) = result {
        *slot.borrow_mut() = Some(e.clone());
    }
}

// =============================================================================
// Coordinator
// =============================================================================

struct Inner {
    session: SessionStore,
    client: ChainClient,
    slots: Slots,
}

#[derive(Clone)]
pub struct TransactionCoordinator {
    inner: Rc<Inner>,
}

impl TransactionCoordinator {
    pub fn new(session: SessionStore, client: ChainClient) -> Self {
        Self { inner: Rc::new(Inner { session, client, slots: Slots::default() }) }
    }

    pub fn client(&self) -> &ChainClient { &self.inner.client }

    fn resolve(&self, account: Option<Account>, chain: Option<String>) -> Result<(WalletHandle, Account, String)> {
        let wallet = self.inner.session.current_wallet().ok_or(DAppKitError::NotConnected)?;
        let account = account.or_else(|| self.inner.session.current_account()).ok_or(DAppKitError::NoAccountSelected)?;
        let chain = chain.unwrap_or_else(|| self.inner.client.chain());
        Ok((wallet, account, chain))
    }

    fn lazy(&self, payload: TransactionPayload) -> LazyTransaction {
        LazyTransaction::new(
            payload,
            BuildContext {
                supported_intents: self.inner.session.supported_intents(),
                executor: self.inner.client.executor(),
            },
        )
    }

    async fn sign_with_wallet(
        &self,
        wallet: &WalletHandle,
        account: Account,
        chain: String,
        payload: TransactionPayload,
    ) -> Result<SignedBytes> {
        let features = wallet.features();
        let modern = features.contains(&Feature::SignTransaction);
        if !modern && !features.contains(&Feature::SignTransactionBlock) {
            return Err(DAppKitError::FeatureNotSupported(sui::SIGN_TRANSACTION.into()));
        }

        let input = SignTransactionInput { transaction: self.lazy(payload), account, chain };
        if modern {
            wallet.sign_transaction(input).await
        } else {
            tracing::debug!(wallet = wallet.name(), "signing with sui:signTransactionBlock");
            let out = wallet.sign_transaction_block(input).await?;
            Ok(SignedBytes { bytes: out.transaction_block_bytes, signature: out.signature })
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    pub async fn sign_transaction(&self, args: SignTransactionArgs) -> Result<SignedTransaction> {
        let slots = &self.inner.slots;
        let _busy = BusyGuard::hold(&slots.signing_transaction);
        slots.sign_transaction_error.replace(None);

        let result: Result<SignedTransaction> = async {
            let (wallet, account, chain) = self.resolve(args.account, args.chain)?;
            let signed = self.sign_with_wallet(&wallet, account.clone(), chain.clone(), args.transaction).await?;
            Ok(SignedTransaction {
                bytes: signed.bytes,
                signature: signed.signature,
                account,
                chain,
                coordinator: self.clone(),
            })
        }
        .await;

        if let Err(e) = &result {
            tracing::debug!(error = %e, "sign transaction failed");
        }
        record(&slots.sign_transaction_error, &result);
        result
    }

    /// Sign, execute with raw effects, then report the effects to the wallet.
    pub async fn sign_and_execute_transaction(&self, args: SignAndExecuteArgs) -> Result<ExecutionResult> {
        let slots = &self.inner.slots;
        let _busy = BusyGuard::hold(&slots.executing_transaction);
        slots.execute_transaction_error.replace(None);

        let result: Result<ExecutionResult> = async {
            let (wallet, account, chain) = self.resolve(args.sign.account, args.sign.chain)?;
            let signed = self.sign_with_wallet(&wallet, account.clone(), chain.clone(), args.sign.transaction).await?;
            let result = self.execute(signed.bytes, signed.signature, args.options).await?;
            if let Some(raw) = &result.raw_effects {
                let effects = base64::engine::general_purpose::STANDARD.encode(raw);
                self.report_transaction_effects(&effects, &account, &chain).await;
            }
            Ok(result)
        }
        .await;

        match &result {
            Ok(r) => tracing::info!(digest = %r.digest, "transaction executed"),
            Err(e) => tracing::debug!(error = %e, "sign and execute failed"),
        }
        record(&slots.execute_transaction_error, &result);
        result
    }

    /// Execute already-signed bytes. Effects are not reported.
    pub async fn execute_signed_transaction(
        &self,
        bytes: impl Into<String>,
        signature: impl Into<String>,
        options: ExecuteOptions,
    ) -> Result<ExecutionResult> {
        let slots = &self.inner.slots;
        let _busy = BusyGuard::hold(&slots.executing_transaction);
        slots.execute_transaction_error.replace(None);

        let result = self.execute(bytes.into(), signature.into(), options).await;
        record(&slots.execute_transaction_error, &result);
        result
    }

    async fn execute(&self, bytes: String, signature: String, options: ExecuteOptions) -> Result<ExecutionResult> {
        let request = ExecuteTransactionRequest {
            transaction_block: bytes,
            signature: vec![signature],
            options: options.with_raw_effects(),
        };
        self.inner.client.executor().execute_transaction_block(request).await
    }

    /// Sign arbitrary bytes. Falls back to the legacy `sui:signMessage` feature.
    pub async fn sign_personal_message(&self, args: SignPersonalMessageArgs) -> Result<SignedBytes> {
        let slots = &self.inner.slots;
        let _busy = BusyGuard::hold(&slots.signing_message);
        slots.sign_message_error.replace(None);

        let result: Result<SignedBytes> = async {
            let (wallet, account, chain) = self.resolve(args.account, args.chain)?;
            let features = wallet.features();
            if features.contains(&Feature::SignPersonalMessage) {
                wallet.sign_personal_message(SignPersonalMessageInput { message: args.message, account, chain }).await
            } else if features.contains(&Feature::SignMessage) {
                tracing::warn!(wallet = wallet.name(), "falling back to legacy sui:signMessage");
                let out = wallet.sign_message(SignMessageInput { message: args.message, account }).await?;
                Ok(SignedBytes { bytes: out.message_bytes, signature: out.signature })
            } else {
                Err(DAppKitError::FeatureNotSupported(sui::SIGN_PERSONAL_MESSAGE.into()))
            }
        }
        .await;

        record(&slots.sign_message_error, &result);
        result
    }

    /// Hand base64 raw effects to the connected wallet, if it accepts them.
    /// Failures are logged only.
    pub async fn report_transaction_effects(&self, effects: &str, account: &Account, chain: &str) {
        let Some(wallet) = self.inner.session.current_wallet() else {
            tracing::debug!("no wallet connected, effects not reported");
            return;
        };
        if !wallet.features().contains(&Feature::ReportTransactionEffects) {
            return;
        }
        let input = ReportEffectsInput { effects: effects.to_string(), account: account.clone(), chain: chain.to_string() };
        if let Err(e) = wallet.report_transaction_effects(input).await {
            tracing::warn!(wallet = wallet.name(), error = %e, "failed to report transaction effects");
        }
    }

    /// Dry-run the transaction on the active network and sum its gas costs.
    pub async fn estimate_gas(&self, transaction: impl Into<TransactionPayload>, sender: &str) -> Result<GasEstimate> {
        let json = self.lazy(transaction.into()).to_json().await?;
        let dry_run = self.inner.client.executor().dry_run_transaction_block(&json, sender).await?;
        let gas = dry_run.gas_used.ok_or_else(|| DAppKitError::transaction("dry run returned no gas summary"))?;
        Ok(GasEstimate::from(gas))
    }

    // =========================================================================
    // Status
    // =========================================================================

    pub fn is_signing_transaction(&self) -> bool { self.inner.slots.signing_transaction.get() }
    pub fn is_executing_transaction(&self) -> bool { self.inner.slots.executing_transaction.get() }
    pub fn is_signing_message(&self) -> bool { self.inner.slots.signing_message.get() }

    /// Transaction signing or execution in flight. Message signing is tracked
    /// separately by [`is_signing_message`](Self::is_signing_message).
    pub fn is_any_transaction_pending(&self) -> bool {
        self.is_signing_transaction() || self.is_executing_transaction()
    }

    pub fn sign_transaction_error(&self) -> Option<DAppKitError> { self.inner.slots.sign_transaction_error.borrow().clone() }
    pub fn execute_transaction_error(&self) -> Option<DAppKitError> {
        self.inner.slots.execute_transaction_error.borrow().clone()
    }
    pub fn sign_message_error(&self) -> Option<DAppKitError> { self.inner.slots.sign_message_error.borrow().clone() }

    pub fn clear_errors(&self) {
        let slots = &self.inner.slots;
        slots.sign_transaction_error.replace(None);
        slots.execute_transaction_error.replace(None);
        slots.sign_message_error.replace(None);
    }
}
