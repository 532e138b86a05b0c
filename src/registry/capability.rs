//! WalletCapability - the operations a discovered wallet exposes

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::core::features::{standard, sui};
use crate::core::{FeatureSet, Subscription};
use crate::error::{DAppKitError, Result};
use crate::transaction::LazyTransaction;

/// Account exposed by a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    #[serde(with = "hex_bytes", default)]
    pub public_key: Vec<u8>,
    /// Chain ids (`family:network`) the account can be used on
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Account {
    pub fn new(address: impl Into<String>, chains: Vec<String>) -> Self {
        Self { address: address.into(), public_key: Vec::new(), chains, features: Vec::new(), label: None, icon: None }
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self { self.label = Some(label.into()); self }
    pub fn with_public_key(mut self, key: Vec<u8>) -> Self { self.public_key = key; self }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectInput {
    /// Do not prompt the user (auto-reconnect only)
    pub silent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOutput {
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub supported_intents: Vec<String>,
}

#[derive(Clone)]
pub struct SignTransactionInput {
    pub transaction: LazyTransaction,
    pub account: Account,
    pub chain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBytes {
    pub bytes: String,
    pub signature: String,
}

/// Output of the legacy `sui:signTransactionBlock` feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransactionBlock {
    pub transaction_block_bytes: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPersonalMessageInput {
    pub message: Vec<u8>,
    pub account: Account,
    pub chain: String,
}

/// Input of the legacy `sui:signMessage` feature (no chain)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignMessageInput {
    pub message: Vec<u8>,
    pub account: Account,
}

/// Output of the legacy `sui:signMessage` feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub message_bytes: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEffectsInput {
    /// Base64 raw effects
    pub effects: String,
    pub account: Account,
    pub chain: String,
}

pub type AccountsListener = Box<dyn Fn(Vec<Account>)>;

/// A wallet provider. Optional operations default to `FeatureNotSupported`;
/// callers check [`WalletCapability::features`] before invoking them.
#[async_trait(?Send)]
pub trait WalletCapability {
    fn name(&self) -> &str;
    fn id(&self) -> Option<&str> { None }
    fn icon(&self) -> Option<&str> { None }
    fn features(&self) -> &FeatureSet;
    /// Accounts the wallet currently exposes (all chain families)
    fn accounts(&self) -> Vec<Account>;

    async fn connect(&self, input: ConnectInput) -> Result<ConnectOutput>;

    async fn disconnect(&self) -> Result<()> {
        Err(DAppKitError::FeatureNotSupported(standard::DISCONNECT.into()))
    }

    async fn sign_transaction(&self, _input: SignTransactionInput) -> Result<SignedBytes> {
        Err(DAppKitError::FeatureNotSupported(sui::SIGN_TRANSACTION.into()))
    }

    async fn sign_transaction_block(&self, _input: SignTransactionInput) -> Result<SignedTransactionBlock> {
        Err(DAppKitError::FeatureNotSupported(sui::SIGN_TRANSACTION_BLOCK.into()))
    }

    async fn sign_personal_message(&self, _input: SignPersonalMessageInput) -> Result<SignedBytes> {
        Err(DAppKitError::FeatureNotSupported(sui::SIGN_PERSONAL_MESSAGE.into()))
    }

    async fn sign_message(&self, _input: SignMessageInput) -> Result<SignedMessage> {
        Err(DAppKitError::FeatureNotSupported(sui::SIGN_MESSAGE.into()))
    }

    async fn report_transaction_effects(&self, _input: ReportEffectsInput) -> Result<()> {
        Err(DAppKitError::FeatureNotSupported(sui::REPORT_TRANSACTION_EFFECTS.into()))
    }

    /// `standard:events` change notifications for the account list
    fn on_accounts_changed(&self, _listener: AccountsListener) -> Subscription { Subscription::noop() }
}

pub type WalletHandle = Rc<dyn WalletCapability>;

/// Stable identity of a wallet: `id`, falling back to `name`.
pub fn wallet_identifier(wallet: &dyn WalletCapability) -> String {
    wallet.id().unwrap_or_else(|| wallet.name()).to_string()
}
