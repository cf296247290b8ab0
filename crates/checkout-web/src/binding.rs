//! Page binding
//!
//! Attaches click handlers to the trigger elements once the document has
//! loaded. Handlers live for the lifetime of the page.

use std::rc::Rc;

use checkout_core::{
    CheckoutLauncher, ElementIds, LaunchError, Navigator, Redirect, Result, SessionBackend, Trigger,
    resolve_triggers,
};
use wasm_bindgen::{JsCast, prelude::Closure};
use web_sys::{Document, Element, Event};

use crate::js::error_message;
use crate::notice::Notice;

/// Run `f` now if the DOM is parsed, otherwise on `DOMContentLoaded`
pub fn when_ready(document: &Document, f: impl FnOnce() + 'static) -> Result<()> {
    if is_parsed(&document.ready_state()) {
        f();
        return Ok(());
    }

    let callback = Closure::once_into_js(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| LaunchError::Config(error_message(&e)))
}

/// `interactive` and `complete` both mean the elements are in the DOM
fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Bind every trigger found on the page; returns how many were bound
pub fn bind_page<B, N>(
    document: &Document,
    ids: &ElementIds,
    launcher: Rc<CheckoutLauncher<B, N>>,
    notice: Notice,
) -> Result<usize>
where
    B: SessionBackend + 'static,
    N: Navigator + 'static,
{
    let triggers = resolve_triggers(ids, launcher.catalog(), |id| document.get_element_by_id(id))?;

    for bound in &triggers {
        attach(&bound.element, bound.trigger, Rc::clone(&launcher), notice)?;
        tracing::debug!(element = %bound.element_id, trigger = ?bound.trigger, "Bound click handler");
    }

    Ok(triggers.len())
}

fn attach<B, N>(element: &Element, trigger: Trigger, launcher: Rc<CheckoutLauncher<B, N>>, notice: Notice) -> Result<()>
where
    B: SessionBackend + 'static,
    N: Navigator + 'static,
{
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let launcher = Rc::clone(&launcher);
        notice.clear();
        wasm_bindgen_futures::spawn_local(async move {
            match launcher.launch(trigger).await {
                Ok(Redirect::Checkout(session_id)) => {
                    tracing::debug!(session_id = %session_id, "Checkout redirect issued");
                }
                Ok(Redirect::Location(url)) => {
                    tracing::debug!(url = %url, "Location assigned");
                }
                Err(e) => {
                    tracing::error!(
                        trigger = ?trigger,
                        error = %e,
                        backend_message = ?e.backend_message(),
                        retryable = e.is_retryable(),
                        "Launch failed"
                    );
                    notice.show(e.user_message());
                }
            }
        });
    });

    element
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(|e| LaunchError::Config(error_message(&e)))?;
    handler.forget();

    Ok(())
}
