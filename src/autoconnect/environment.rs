//! Host hooks used by the auto-connect controller.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait(?Send)]
pub trait Environment {
    /// A document exists whose loading should be awaited
    fn is_interactive(&self) -> bool;

    async fn wait_for_load(&self);

    async fn sleep(&self, duration: Duration);
}

/// Never waits. For hosts without timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateEnvironment;

#[async_trait(?Send)]
impl Environment for ImmediateEnvironment {
    fn is_interactive(&self) -> bool { false }
    async fn wait_for_load(&self) {}
    async fn sleep(&self, _duration: Duration) {}
}

/// Native hosts: no document, tokio timers.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioEnvironment;

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl Environment for TokioEnvironment {
    fn is_interactive(&self) -> bool { false }

    async fn wait_for_load(&self) {}

    async fn sleep(&self, duration: Duration) { tokio::time::sleep(duration).await; }
}
