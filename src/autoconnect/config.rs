use std::fmt;
use std::time::Duration;

use crate::registry::{WalletFilter, WalletListOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoConnectStatus {
    #[default]
    Disabled,
    Idle,
    Attempting,
    Success,
    Failed,
}

impl AutoConnectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoConnectStatus::Disabled => "disabled",
            AutoConnectStatus::Idle => "idle",
            AutoConnectStatus::Attempting => "attempting",
            AutoConnectStatus::Success => "success",
            AutoConnectStatus::Failed => "failed",
        }
    }
}

/// Auto-connect configuration. Disabled unless built with [`AutoConnectConfig::enabled`].
#[derive(Clone)]
pub struct AutoConnectConfig {
    pub enabled: bool,
    pub preferred_wallets: Vec<String>,
    pub wallet_filter: Option<WalletFilter>,
    /// Total attempts per sequence
    pub max_retries: u32,
    /// Base backoff; doubles after each rejected attempt
    pub retry_delay: Duration,
    /// Pause after the document loads, before the first attempt
    pub settle_delay: Duration,
}

impl Default for AutoConnectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            preferred_wallets: Vec::new(),
            wallet_filter: None,
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
            settle_delay: Duration::from_millis(100),
        }
    }
}

impl AutoConnectConfig {
    pub fn enabled() -> Self { Self { enabled: true, ..Default::default() } }
    pub fn with_enabled(mut self, enabled: bool) -> Self { self.enabled = enabled; self }
    pub fn with_max_retries(mut self, n: u32) -> Self { self.max_retries = n; self }
    pub fn with_retry_delay(mut self, d: Duration) -> Self { self.retry_delay = d; self }
    pub fn with_settle_delay(mut self, d: Duration) -> Self { self.settle_delay = d; self }
    pub fn with_preferred_wallets(mut self, names: Vec<String>) -> Self { self.preferred_wallets = names; self }
    pub fn with_wallet_filter(mut self, f: WalletFilter) -> Self { self.wallet_filter = Some(f); self }

    /// Wallet list options, when this config carries any.
    pub fn list_options(&self) -> Option<WalletListOptions> {
        if self.preferred_wallets.is_empty() && self.wallet_filter.is_none() {
            return None;
        }
        Some(WalletListOptions { preferred_wallets: self.preferred_wallets.clone(), wallet_filter: self.wallet_filter.clone() })
    }

    /// Sleep before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.retry_delay.saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
    }
}

impl fmt::Debug for AutoConnectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoConnectConfig")
            .field("enabled", &self.enabled)
            .field("preferred_wallets", &self.preferred_wallets)
            .field("wallet_filter", &self.wallet_filter.is_some())
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("settle_delay", &self.settle_delay)
            .finish()
    }
}
