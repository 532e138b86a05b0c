//! MemoryRegistry - in-process wallet registry for native hosts and tests

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::capability::{wallet_identifier, WalletHandle};
use super::wallets::WalletRegistry;
use crate::core::Subscription;

struct Listener {
    on_register: Rc<dyn Fn()>,
    on_unregister: Rc<dyn Fn(&WalletHandle)>,
}

#[derive(Default)]
struct RegistryInner {
    wallets: Vec<WalletHandle>,
    listeners: BTreeMap<u64, Listener>,
    next_id: u64,
}

/// Registry backed by a list. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl MemoryRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register a wallet; replaces an existing wallet with the same identifier.
    pub fn register(&self, wallet: WalletHandle) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            let id = wallet_identifier(wallet.as_ref());
            inner.wallets.retain(|w| wallet_identifier(w.as_ref()) != id);
            inner.wallets.push(wallet);
            inner.listeners.values().map(|l| l.on_register.clone()).collect::<Vec<_>>()
        };
        for on_register in listeners { on_register(); }
    }

    /// Remove the wallet with this identifier. Returns false when absent.
    pub fn unregister(&self, identifier: &str) -> bool {
        let (removed, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let Some(pos) = inner.wallets.iter().position(|w| wallet_identifier(w.as_ref()) == identifier) else {
                return false;
            };
            let removed = inner.wallets.remove(pos);
            (removed, inner.listeners.values().map(|l| l.on_unregister.clone()).collect::<Vec<_>>())
        };
        for on_unregister in listeners { on_unregister(&removed); }
        true
    }

    pub fn len(&self) -> usize { self.inner.borrow().wallets.len() }

    pub fn is_empty(&self) -> bool { self.inner.borrow().wallets.is_empty() }
}

impl WalletRegistry for MemoryRegistry {
    fn wallets(&self) -> Vec<WalletHandle> { self.inner.borrow().wallets.clone() }

    fn subscribe(&self, on_register: Box<dyn Fn()>, on_unregister: Box<dyn Fn(&WalletHandle)>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, Listener { on_register: Rc::from(on_register), on_unregister: Rc::from(on_unregister) });
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() { inner.borrow_mut().listeners.remove(&id); }
        })
    }
}
