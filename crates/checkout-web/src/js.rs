use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Error;

/// Best-effort text for a thrown JS value
pub fn error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}
