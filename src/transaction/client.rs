//! ChainClient - named networks and the active executor.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::executor::ChainExecutor;
use crate::core::format_chain;
use crate::error::{DAppKitError, Result};

struct Inner {
    family: String,
    networks: BTreeMap<String, Rc<dyn ChainExecutor>>,
    current: RefCell<(String, Rc<dyn ChainExecutor>)>,
}

/// Clones share the selected network.
#[derive(Clone)]
pub struct ChainClient {
    inner: Rc<Inner>,
}

impl ChainClient {
    /// Fails with `ChainNotSupported` when `default_network` has no executor.
    pub fn new(
        family: impl Into<String>,
        networks: BTreeMap<String, Rc<dyn ChainExecutor>>,
        default_network: &str,
    ) -> Result<Self> {
        let family = family.into();
        let executor = networks
            .get(default_network)
            .cloned()
            .ok_or_else(|| DAppKitError::ChainNotSupported(format_chain(&family, default_network)))?;
        Ok(Self {
            inner: Rc::new(Inner { family, networks, current: RefCell::new((default_network.to_string(), executor)) }),
        })
    }

    pub fn select_network(&self, name: &str) -> Result<()> {
        if self.inner.current.borrow().0 == name {
            return Ok(());
        }
        let executor = self
            .inner
            .networks
            .get(name)
            .cloned()
            .ok_or_else(|| DAppKitError::ChainNotSupported(format_chain(&self.inner.family, name)))?;
        *self.inner.current.borrow_mut() = (name.to_string(), executor);
        tracing::info!(network = name, "network selected");
        Ok(())
    }

    pub fn network(&self) -> String { self.inner.current.borrow().0.clone() }

    pub fn executor(&self) -> Rc<dyn ChainExecutor> { self.inner.current.borrow().1.clone() }

    /// `family:network` of the active network
    pub fn chain(&self) -> String { format_chain(&self.inner.family, &self.inner.current.borrow().0) }

    pub fn family(&self) -> &str { &self.inner.family }

    pub fn networks(&self) -> impl Iterator<Item = &str> { self.inner.networks.keys().map(String::as_str) }
}

impl fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainClient")
            .field("family", &self.inner.family)
            .field("network", &self.network())
            .field("networks", &self.inner.networks.keys().collect::<Vec<_>>())
            .finish()
    }
}
