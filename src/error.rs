use thiserror::Error;

/// Errors surfaced by the connection, auto-connect and signing layers.
///
/// Every variant belongs to an [`ErrorCategory`], so callers can branch on the
/// category without naming each kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DAppKitError {
    /// No wallet is attached to the session
    #[error("No wallet is connected")]
    NotConnected,

    /// Nothing persisted to reconnect to
    #[error("No saved wallet connection")]
    NoSavedSession,

    /// Wallet attached but no account resolved for the operation
    #[error("No account is selected")]
    NoAccountSelected,

    /// Address is not among the wallet's known accounts
    #[error("Account {0} not found in wallet")]
    AccountNotFound(String),

    /// Wallet returned no accounts for the chain family
    #[error("No accounts are connected")]
    NoAccountsConnected,

    /// Wallet does not declare the feature(s) an operation needs
    #[error("Wallet does not support {0}")]
    FeatureNotSupported(String),

    /// Chain or network is not configured
    #[error("Chain not supported: {0}")]
    ChainNotSupported(String),

    #[error("Transaction failed: {message}")]
    TransactionFailed { message: String, digest: Option<String> },

    #[error("Transaction timed out")]
    TransactionTimedOut { digest: Option<String> },

    #[error("Network error: {message}")]
    NetworkFailure { message: String, network: Option<String> },

    /// Wallet rejected or failed a request
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Durable key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse grouping of [`DAppKitError`] kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Wallet,
    Feature,
    Transaction,
    Network,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// What the user can do about an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    ConnectWallet,
    SwitchAccount,
    UseDifferentWallet,
    SwitchNetwork,
    RetryTransaction,
}

impl RecoveryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryAction::ConnectWallet => "connect_wallet",
            RecoveryAction::SwitchAccount => "switch_account",
            RecoveryAction::UseDifferentWallet => "use_different_wallet",
            RecoveryAction::SwitchNetwork => "switch_network",
            RecoveryAction::RetryTransaction => "retry_transaction",
        }
    }
}

impl DAppKitError {
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::TransactionFailed { message: message.into(), digest: None }
    }

    pub fn network(message: impl Into<String>, network: Option<String>) -> Self {
        Self::NetworkFailure { message: message.into(), network }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotConnected
            | Self::NoSavedSession
            | Self::NoAccountSelected
            | Self::AccountNotFound(_)
            | Self::NoAccountsConnected => ErrorCategory::Wallet,
            Self::FeatureNotSupported(_) | Self::ChainNotSupported(_) => ErrorCategory::Feature,
            Self::TransactionFailed { .. } | Self::TransactionTimedOut { .. } => ErrorCategory::Transaction,
            Self::NetworkFailure { .. } => ErrorCategory::Network,
            Self::Wallet(_) | Self::Storage(_) | Self::Serialization(_) => ErrorCategory::Other,
        }
    }

    pub fn is_wallet_error(&self) -> bool { self.category() == ErrorCategory::Wallet }
    pub fn is_feature_error(&self) -> bool { self.category() == ErrorCategory::Feature }
    pub fn is_transaction_error(&self) -> bool { self.category() == ErrorCategory::Transaction }

    /// Digest carried by transaction errors, if known
    pub fn digest(&self) -> Option<&str> {
        match self {
            Self::TransactionFailed { digest, .. } | Self::TransactionTimedOut { digest } => digest.as_deref(),
            _ => None,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotConnected | Self::NoSavedSession => ErrorSeverity::Info,
            Self::FeatureNotSupported(_) | Self::ChainNotSupported(_) => ErrorSeverity::Warning,
            Self::NoAccountSelected | Self::AccountNotFound(_) | Self::NoAccountsConnected => ErrorSeverity::Error,
            Self::TransactionFailed { .. } | Self::TransactionTimedOut { .. } | Self::NetworkFailure { .. } => {
                ErrorSeverity::Error
            }
            Self::Wallet(_) | Self::Storage(_) | Self::Serialization(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_action(&self) -> Option<RecoveryAction> {
        match self {
            Self::NotConnected | Self::NoSavedSession => Some(RecoveryAction::ConnectWallet),
            Self::AccountNotFound(_) => Some(RecoveryAction::SwitchAccount),
            Self::FeatureNotSupported(_) => Some(RecoveryAction::UseDifferentWallet),
            Self::NetworkFailure { .. } => Some(RecoveryAction::SwitchNetwork),
            Self::TransactionTimedOut { .. } => Some(RecoveryAction::RetryTransaction),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DAppKitError {
    fn from(e: serde_json::Error) -> Self { DAppKitError::Serialization(e.to_string()) }
}

/// Result type alias for dappkit operations
pub type Result<T> = std::result::Result<T, DAppKitError>;
