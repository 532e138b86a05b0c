//! Auto-Connect Controller - silent reconnect to the last wallet at startup
//!
//! # States
//!
//! ```text
//! Disabled ──configure(enabled)──▶ Idle ──initialize()──▶ Attempting ──▶ Success
//!                                                            │   ▲
//!                                                            ▼   │ retry()
//!                                                           Failed
//! ```
//!
//! | Attempt outcome | Retried | Persisted record |
//! |-----------------|---------|------------------|
//! | no record | no | - |
//! | wallet not listed | no | cleared |
//! | no account in chain family | no | cleared |
//! | wallet rejects connect | yes, exponential backoff | kept |
//!
//! Failures never reach the caller; read [`AutoConnect::status`] and
//! [`AutoConnect::error`].

mod config;
mod controller;
mod environment;

pub use config::{AutoConnectConfig, AutoConnectStatus};
pub use controller::AutoConnect;
pub use environment::{Environment, ImmediateEnvironment};
#[cfg(feature = "native")]
pub use environment::TokioEnvironment;
