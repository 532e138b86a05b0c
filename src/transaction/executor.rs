//! Chain executor interface (external RPC client) and its result types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteOptions {
    #[serde(default)]
    pub show_input: bool,
    #[serde(default)]
    pub show_raw_input: bool,
    #[serde(default)]
    pub show_effects: bool,
    #[serde(default)]
    pub show_events: bool,
    #[serde(default)]
    pub show_object_changes: bool,
    #[serde(default)]
    pub show_balance_changes: bool,
    #[serde(default)]
    pub show_raw_effects: bool,
}

impl ExecuteOptions {
    pub fn with_effects(mut self) -> Self { self.show_effects = true; self }
    pub fn with_events(mut self) -> Self { self.show_events = true; self }
    pub fn with_object_changes(mut self) -> Self { self.show_object_changes = true; self }
    pub fn with_balance_changes(mut self) -> Self { self.show_balance_changes = true; self }
    pub fn with_raw_effects(mut self) -> Self { self.show_raw_effects = true; self }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransactionRequest {
    /// Signed transaction bytes, base64
    pub transaction_block: String,
    pub signature: Vec<String>,
    pub options: ExecuteOptions,
}

/// Executor response, returned to callers uninterpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<Value>,
    #[serde(default)]
    pub raw_effects: Option<Vec<u8>>,
    #[serde(default)]
    pub events: Option<Value>,
    #[serde(default)]
    pub object_changes: Option<Value>,
    #[serde(default)]
    pub balance_changes: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
    #[serde(default)]
    pub non_refundable_storage_fee: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunResult {
    pub gas_used: Option<GasCostSummary>,
    #[serde(default)]
    pub effects: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
    /// computation + storage - rebate; negative when the rebate dominates
    pub total_cost: i128,
}

impl From<GasCostSummary> for GasEstimate {
    fn from(gas: GasCostSummary) -> Self {
        let total_cost = gas.computation_cost as i128 + gas.storage_cost as i128 - gas.storage_rebate as i128;
        Self {
            computation_cost: gas.computation_cost,
            storage_cost: gas.storage_cost,
            storage_rebate: gas.storage_rebate,
            total_cost,
        }
    }
}

/// Chain RPC client that submits signed transactions.
#[async_trait(?Send)]
pub trait ChainExecutor {
    async fn execute_transaction_block(&self, request: ExecuteTransactionRequest) -> Result<ExecutionResult>;

    async fn dry_run_transaction_block(&self, transaction: &str, sender: &str) -> Result<DryRunResult>;
}
