use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement,
    HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions, Url, Window,
};

use super::{dom_error, window};
use crate::error::AppError;
use crate::view::View;

/// `View` over the live document. Missing elements are skipped with a debug
/// log; the page markup comes from our own templates, so a miss means the
/// element was not mounted yet.
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn new() -> Result<Self, AppError> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| AppError::Dom("no document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::debug!("#{} not in document", id);
        }
        el
    }

    fn smooth(left: Option<f64>, top: Option<f64>) -> ScrollToOptions {
        let opts = ScrollToOptions::new();
        if let Some(left) = left {
            opts.set_left(left);
        }
        if let Some(top) = top {
            opts.set_top(top);
        }
        opts.set_behavior(ScrollBehavior::Smooth);
        opts
    }

    /// Mount the page markup into `<body>` and the stylesheet into `<head>`.
    pub fn mount(&self, body_html: &str, stylesheet: &str) -> Result<(), AppError> {
        let head = self
            .document
            .head()
            .ok_or_else(|| AppError::Dom("no <head>".to_string()))?;
        let style = self.document.create_element("style").map_err(dom_error)?;
        style.set_text_content(Some(stylesheet));
        head.append_child(&style).map_err(dom_error)?;

        let body = self
            .document
            .body()
            .ok_or_else(|| AppError::Dom("no <body>".to_string()))?;
        body.set_inner_html(body_html);
        Ok(())
    }

    /// Vertical scroll offset of the window.
    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl View for DomView {
    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_value(&mut self, id: &str, value: &str) {
        let Some(el) = self.element(id) else { return };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_html(&mut self, id: &str, html: &str) {
        if let Some(el) = self.element(id) {
            el.set_inner_html(html);
        }
    }

    fn set_image(&mut self, id: &str, src: &str, alt: &str) {
        if let Some(img) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        {
            img.set_src(src);
            img.set_alt(alt);
        }
    }

    fn set_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.element(id) {
            if let Err(e) = el.class_list().toggle_with_force(class, on) {
                log::warn!("class {} on #{}: {}", class, id, super::describe(&e));
            }
        }
    }

    fn toggle_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            if let Err(e) = el.class_list().toggle(class) {
                log::warn!("class {} on #{}: {}", class, id, super::describe(&e));
            }
        }
    }

    fn set_theme(&mut self, theme: &str) {
        if let Some(body) = self.document.body() {
            if let Err(e) = body.set_attribute("data-theme", theme) {
                log::warn!("data-theme: {}", super::describe(&e));
            }
        }
    }

    fn mark_active_theme(&mut self, theme: &str) {
        let buttons = self.document.get_elements_by_class_name("theme-option");
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i) else { continue };
            let active = button.get_attribute("data-theme").as_deref() == Some(theme);
            if let Err(e) = button.class_list().toggle_with_force("active", active) {
                log::warn!("active theme marker: {}", super::describe(&e));
            }
        }
    }

    fn scroll_by(&mut self, id: &str, dx: i32) {
        if let Some(el) = self.element(id) {
            el.scroll_by_with_scroll_to_options(&Self::smooth(Some(f64::from(dx)), None));
        }
    }

    fn scroll_to_child(&mut self, container_id: &str, child_id: &str) {
        let (Some(container), Some(child)) = (self.element(container_id), self.element(child_id))
        else {
            return;
        };
        let top = child
            .dyn_ref::<HtmlElement>()
            .map(|c| f64::from(c.offset_top()))
            .unwrap_or(0.0);
        container.scroll_to_with_scroll_to_options(&Self::smooth(None, Some(top)));
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert: {}", super::describe(&e));
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn reload(&mut self) {
        if let Err(e) = self.window.location().reload() {
            log::warn!("reload: {}", super::describe(&e));
        }
    }

    fn location(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn download(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), AppError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let props = BlobPropertyBag::new();
        props.set_type(mime);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &props).map_err(dom_error)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(dom_error)?;

        let anchor = self
            .document
            .create_element("a")
            .map_err(dom_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| AppError::Dom("<a> is not an anchor".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        Url::revoke_object_url(&url).map_err(dom_error)
    }
}
