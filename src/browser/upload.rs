use std::future::Future;

use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use super::describe;
use crate::error::AppError;
use crate::routes::stories::UploadedFile;

impl UploadedFile for File {
    fn mime_type(&self) -> String {
        self.type_()
    }

    fn read_bytes(&self) -> impl Future<Output = Result<Vec<u8>, AppError>> {
        let pending = JsFuture::from(self.array_buffer());
        async move {
            let buffer = pending
                .await
                .map_err(|e| AppError::FileRead(describe(&e)))?;
            Ok(js_sys::Uint8Array::new(&buffer).to_vec())
        }
    }
}
