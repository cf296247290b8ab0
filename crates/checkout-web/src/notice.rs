//! Checkout notice
//!
//! A dismissable banner that shows why the last click went nowhere.

use leptos::prelude::*;

/// Handle for setting the banner text from click handlers
#[derive(Clone, Copy)]
pub struct Notice {
    message: RwSignal<Option<String>>,
}

impl Notice {
    /// Mount the banner at the end of `<body>`
    pub fn mount() -> Self {
        let message = RwSignal::new(None::<String>);
        leptos::mount::mount_to_body(move || view! { <CheckoutNotice message=message /> });
        Self { message }
    }

    pub fn show(&self, text: impl Into<String>) {
        self.message.set(Some(text.into()));
    }

    pub fn clear(&self) {
        self.message.set(None);
    }
}

#[component]
pub fn CheckoutNotice(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="checkout-notice" role="alert">
                <p class="content">{move || message.get().unwrap_or_default()}</p>
                <button class="btn" on:click=move |_| message.set(None)>
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}
