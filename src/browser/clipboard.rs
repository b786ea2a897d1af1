use std::future::Future;

use wasm_bindgen_futures::JsFuture;

use super::{describe, window};
use crate::error::AppError;
use crate::routes::admin::Clipboard;

/// `navigator.clipboard`.
pub struct NavigatorClipboard;

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), AppError>> {
        let pending = window()
            .map(|w| JsFuture::from(w.navigator().clipboard().write_text(text)));
        async move {
            pending?
                .await
                .map(|_| ())
                .map_err(|e| AppError::Clipboard(describe(&e)))
        }
    }
}
