//! Connection Coordinator - connect, disconnect, switch account
//!
//! Orchestrates wallet connect/disconnect and writes results to the
//! [`SessionStore`](crate::session::SessionStore). Capability checks run
//! before any wallet interaction.

mod coordinator;

pub use coordinator::{ConnectArgs, ConnectOutcome, ConnectionCoordinator};
