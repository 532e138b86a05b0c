//! Transaction Signing Coordinator - sign, execute, report effects
//!
//! ```text
//! sign_and_execute_transaction
//!     │ resolve wallet / account / chain (session + ChainClient)
//!     ▼
//! wallet.sign_transaction ── legacy: sign_transaction_block (remapped)
//!     │  LazyTransaction::to_json() called by the wallet when it needs bytes
//!     ▼
//! ChainExecutor.execute_transaction_block (show_raw_effects forced on)
//!     │
//!     ▼
//! wallet.report_transaction_effects(base64(raw_effects))   best-effort
//! ```
//!
//! Each operation holds a busy flag for its duration and records its last
//! error; both are observable through getters on [`TransactionCoordinator`].

mod client;
mod coordinator;
mod executor;
mod payload;

pub use client::ChainClient;
pub use coordinator::{
    SignAndExecuteArgs, SignPersonalMessageArgs, SignTransactionArgs, SignedTransaction, TransactionCoordinator,
};
pub use executor::{
    ChainExecutor, DryRunResult, ExecuteOptions, ExecuteTransactionRequest, ExecutionResult, GasCostSummary,
    GasEstimate,
};
pub use payload::{BuildContext, LazyTransaction, TransactionBuilder, TransactionPayload};
