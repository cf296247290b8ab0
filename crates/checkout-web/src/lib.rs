//! Checkout page frontend
//!
//! WASM entry point that wires the checkout and billing buttons to the
//! session backend and Stripe's hosted pages.
//!
//! The page provides:
//!
//! ```html
//! <script src="https://js.stripe.com/v3/"></script>
//! <script type="application/json" id="checkout-config">
//!   { "publishableKey": "pk_test_...", "basicPriceId": "price_...", "premiumPriceId": "" }
//! </script>
//! <button id="checkout-basic">Subscribe</button>
//! <button id="manage-billing">Manage billing</button>   <!-- optional -->
//! ```

mod binding;
mod js;
mod logging;
mod notice;
mod stripe;

pub use binding::{bind_page, when_ready};
pub use notice::{CheckoutNotice, Notice};
pub use stripe::BrowserNavigator;

use std::rc::Rc;

use checkout_core::{CheckoutLauncher, HttpSessionBackend, LaunchError, LauncherConfig, Result};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::js::error_message;

/// Id of the JSON config block
pub const CONFIG_ELEMENT_ID: &str = "checkout-config";

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let ready_document = document.clone();
    if let Err(e) = when_ready(&document, move || boot(&window, &ready_document)) {
        web_sys::console::error_1(&e.to_string().into());
    }
}

fn boot(window: &Window, document: &Document) {
    let config = load_config(document);
    logging::init(config.as_ref().map_or("info", |c| c.log_level.as_str()));

    let notice = Notice::mount();

    match config.and_then(|config| start(window, document, &config, notice)) {
        Ok(bound) => tracing::info!(bound, "Checkout launcher ready"),
        Err(e) => {
            tracing::error!(error = %e, "Checkout launcher failed to start");
            notice.show(e.user_message());
        }
    }
}

fn start(window: &Window, document: &Document, config: &LauncherConfig, notice: Notice) -> Result<usize> {
    let origin = window
        .location()
        .origin()
        .map_err(|e| LaunchError::Config(format!("page origin unavailable: {}", error_message(&e))))?;

    let backend = HttpSessionBackend::new(&origin, config)?;
    let navigator = BrowserNavigator::new(window.clone(), &config.publishable_key)?;
    let launcher = Rc::new(CheckoutLauncher::new(backend, navigator, config.catalog()));

    bind_page(document, &config.elements, launcher, notice)
}

/// Read and validate the page's JSON config block
pub fn load_config(document: &Document) -> Result<LauncherConfig> {
    let element = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .ok_or_else(|| LaunchError::ElementMissing(CONFIG_ELEMENT_ID.into()))?;

    LauncherConfig::from_json(&element.text_content().unwrap_or_default())
}
