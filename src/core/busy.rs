//! Scoped busy flag.

use std::cell::Cell;

/// Sets the flag on creation and clears it when dropped, on every exit path.
pub(crate) struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    pub(crate) fn hold(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) { self.0.set(false); }
}
