//! Browser adapters: `web-sys` implementations of the store, view, ticker,
//! upload and clipboard seams.
//!
//! Nothing here holds domain logic. Each adapter maps one trait onto the
//! matching browser API and turns `JsValue` failures into `AppError`.

mod clipboard;
mod dom;
mod storage;
mod ticker;
mod upload;

pub use clipboard::NavigatorClipboard;
pub use dom::DomView;
pub use storage::LocalStorage;
pub use ticker::IntervalTicker;

use wasm_bindgen::JsValue;

use crate::error::AppError;

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

pub(crate) fn dom_error(value: JsValue) -> AppError {
    AppError::Dom(describe(&value))
}

pub(crate) fn window() -> Result<web_sys::Window, AppError> {
    web_sys::window().ok_or_else(|| AppError::Dom("no window".to_string()))
}
