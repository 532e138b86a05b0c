use async_trait::async_trait;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::autoconnect::Environment;

const LOAD_POLL: Duration = Duration::from_millis(10);

/// Browser host: waits for `document.readyState` to leave `loading`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEnvironment;

#[async_trait(?Send)]
impl Environment for BrowserEnvironment {
    fn is_interactive(&self) -> bool { web_sys::window().and_then(|w| w.document()).is_some() }

    async fn wait_for_load(&self) {
        loop {
            let loading = web_sys::window()
                .and_then(|w| w.document())
                .map_or(false, |d| d.ready_state() == "loading");
            if !loading {
                return;
            }
            self.sleep(LOAD_POLL).await;
        }
    }

    async fn sleep(&self, duration: Duration) {
        let Some(window) = web_sys::window() else { return };
        let ms = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms) {
                crate::wasm::log!("setTimeout failed: {}", super::js_error(e));
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
