//! WASM module: browser platform for dappkit
//!
//! Provides:
//! - `LocalStorage` - `window.localStorage` as the session record store
//! - `BrowserEnvironment` - `document.readyState` wait and `setTimeout` sleeps

mod environment;
mod storage;

pub use environment::BrowserEnvironment;
pub use storage::LocalStorage;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;

pub(crate) fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
