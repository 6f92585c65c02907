//! Injected wallet provider.
//!
//! Wraps the Phantom-style object the extension injects at `window.solana`.
//! This is the one place that touches the global; everything else goes
//! through the `WalletProvider` capability trait.

use async_trait::async_trait;
use gp_client::{ConnectOptions, WalletError, WalletProvider};
use gp_types::WalletAddress;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

const INJECTION_KEY: &str = "solana";
const PROVIDER_FLAG: &str = "isPhantom";

#[derive(Default)]
pub struct InjectedWalletProvider;

impl InjectedWalletProvider {
    pub fn new() -> Self {
        Self
    }

    fn injected() -> Option<js_sys::Object> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(INJECTION_KEY)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        value.dyn_into::<js_sys::Object>().ok()
    }

    fn reports_expected_provider(provider: &js_sys::Object) -> bool {
        js_sys::Reflect::get(provider, &JsValue::from_str(PROVIDER_FLAG))
            .map(|flag| flag.as_bool().unwrap_or(false))
            .unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedWalletProvider {
    fn is_available(&self) -> bool {
        Self::injected()
            .map(|provider| Self::reports_expected_provider(&provider))
            .unwrap_or(false)
    }

    async fn connect(&self, options: ConnectOptions) -> Result<WalletAddress, WalletError> {
        let provider = Self::injected().ok_or(WalletError::ProviderMissing)?;

        let connect_fn = js_sys::Reflect::get(&provider, &JsValue::from_str("connect"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(WalletError::ProviderMissing)?;

        let call_result = if options.only_if_trusted {
            let opts = js_sys::Object::new();
            js_sys::Reflect::set(&opts, &JsValue::from_str("onlyIfTrusted"), &JsValue::TRUE)
                .map_err(|err| WalletError::Declined(format!("{err:?}")))?;
            connect_fn.call1(&provider, &opts)
        } else {
            connect_fn.call0(&provider)
        }
        .map_err(|err| WalletError::Declined(format!("{err:?}")))?;

        let promise: js_sys::Promise = call_result
            .dyn_into()
            .map_err(|_| WalletError::Declined("connect did not return a promise".to_owned()))?;
        let response = JsFuture::from(promise)
            .await
            .map_err(|err| WalletError::Declined(format!("{err:?}")))?;

        let public_key = js_sys::Reflect::get(&response, &JsValue::from_str("publicKey"))
            .map_err(|err| WalletError::Declined(format!("{err:?}")))?;
        if public_key.is_undefined() || public_key.is_null() {
            return Err(WalletError::Declined(
                "connect response carried no public key".to_owned(),
            ));
        }

        let address = String::from(js_sys::Object::from(public_key).to_string());
        Ok(WalletAddress(address))
    }
}
