//! Unsubscribe handle returned by registries and wallets for callback listeners.

use std::fmt;

/// Calling [`Subscription::unsubscribe`] detaches the listener. Dropping the
/// handle without calling it leaves the listener attached.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription(Option<Box<dyn FnOnce()>>);

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self { Self(Some(Box::new(unsubscribe))) }

    /// A handle with nothing to detach.
    pub fn noop() -> Self { Self(None) }

    pub fn unsubscribe(mut self) {
        if let Some(f) = self.0.take() { f(); }
    }

    /// Merge two handles; unsubscribing the result detaches both.
    pub fn and(self, other: Subscription) -> Self {
        Subscription::new(move || {
            self.unsubscribe();
            other.unsubscribe();
        })
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.0.is_some()).finish()
    }
}
