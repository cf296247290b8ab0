//! Stripe.js bindings
//!
//! Only the two pieces the launcher needs: the global `Stripe(key)`
//! constructor and `stripe.redirectToCheckout({ sessionId })`.

use async_trait::async_trait;
use checkout_core::{LaunchError, Navigator, Result, SessionId};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;
use web_sys::js_sys::{Object, Promise, Reflect};

use crate::js::error_message;

#[wasm_bindgen]
extern "C" {
    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// `Stripe("pk_...")`; throws when Stripe.js is not on the page
    #[wasm_bindgen(catch, js_name = Stripe, js_namespace = window)]
    fn new_stripe(publishable_key: &str) -> std::result::Result<JsStripe, JsValue>;

    /// `stripe.redirectToCheckout({ sessionId })` → `Promise<{ error? }>`
    #[wasm_bindgen(method, catch, js_name = redirectToCheckout)]
    fn redirect_to_checkout(this: &JsStripe, options: &JsValue) -> std::result::Result<Promise, JsValue>;
}

/// Navigates through Stripe.js for checkout and `window.location` otherwise
pub struct BrowserNavigator {
    stripe: JsStripe,
    window: Window,
}

impl BrowserNavigator {
    pub fn new(window: Window, publishable_key: &str) -> Result<Self> {
        let stripe = new_stripe(publishable_key)
            .map_err(|e| LaunchError::Config(format!("Stripe.js not loaded: {}", error_message(&e))))?;
        Ok(Self { stripe, window })
    }
}

#[async_trait(?Send)]
impl Navigator for BrowserNavigator {
    async fn redirect_to_checkout(&self, session_id: &SessionId) -> Result<()> {
        let options = Object::new();
        Reflect::set(&options, &"sessionId".into(), &session_id.as_str().into())
            .map_err(|e| LaunchError::Redirect(error_message(&e)))?;

        let promise = self
            .stripe
            .redirect_to_checkout(&options)
            .map_err(|e| LaunchError::Redirect(error_message(&e)))?;
        let outcome = JsFuture::from(promise)
            .await
            .map_err(|e| LaunchError::Redirect(error_message(&e)))?;

        // Resolves only on failure; success leaves the page
        let error = Reflect::get(&outcome, &"error".into()).unwrap_or(JsValue::UNDEFINED);
        if error.is_undefined() || error.is_null() {
            return Ok(());
        }
        let message = Reflect::get(&error, &"message".into())
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| "redirectToCheckout failed".into());
        Err(LaunchError::Redirect(message))
    }

    fn assign_location(&self, url: &str) -> Result<()> {
        self.window
            .location()
            .set_href(url)
            .map_err(|e| LaunchError::Redirect(error_message(&e)))
    }
}
