//! Fabricated collaborators for native tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::future::Future;
use std::rc::Rc;

use crate::app::App;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::countdown::Ticker;
use crate::model::store::{KeyValueStore, MemoryStore};
use crate::routes::admin::Clipboard;
use crate::routes::stories::UploadedFile;
use crate::view::View;

/// Records every call a renderer or controller makes.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub texts: HashMap<String, String>,
    pub values: HashMap<String, String>,
    pub htmls: HashMap<String, String>,
    pub images: HashMap<String, (String, String)>,
    pub classes: HashSet<(String, String)>,
    pub theme: Option<String>,
    pub active_theme: Option<String>,
    pub scrolls: Vec<(String, i32)>,
    pub scrolled_to: Vec<(String, String)>,
    pub notices: Vec<String>,
    pub confirm_answer: bool,
    pub confirms: usize,
    pub reloads: usize,
    pub downloads: Vec<(String, String, String)>,
    pub url: String,
}

impl RecordingView {
    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn html(&self, id: &str) -> Option<&str> {
        self.htmls.get(id).map(String::as_str)
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.classes.contains(&(id.to_string(), class.to_string()))
    }
}

impl View for RecordingView {
    fn set_text(&mut self, id: &str, text: &str) {
        self.texts.insert(id.to_string(), text.to_string());
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.values.insert(id.to_string(), value.to_string());
    }

    fn set_html(&mut self, id: &str, html: &str) {
        self.htmls.insert(id.to_string(), html.to_string());
    }

    fn set_image(&mut self, id: &str, src: &str, alt: &str) {
        self.images
            .insert(id.to_string(), (src.to_string(), alt.to_string()));
    }

    fn set_class(&mut self, id: &str, class: &str, on: bool) {
        let key = (id.to_string(), class.to_string());
        if on {
            self.classes.insert(key);
        } else {
            self.classes.remove(&key);
        }
    }

    fn toggle_class(&mut self, id: &str, class: &str) {
        let on = !self.has_class(id, class);
        self.set_class(id, class, on);
    }

    fn set_theme(&mut self, theme: &str) {
        self.theme = Some(theme.to_string());
    }

    fn mark_active_theme(&mut self, theme: &str) {
        self.active_theme = Some(theme.to_string());
    }

    fn scroll_by(&mut self, id: &str, dx: i32) {
        self.scrolls.push((id.to_string(), dx));
    }

    fn scroll_to_child(&mut self, container_id: &str, child_id: &str) {
        self.scrolled_to
            .push((container_id.to_string(), child_id.to_string()));
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn confirm(&mut self, _message: &str) -> bool {
        self.confirms += 1;
        self.confirm_answer
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    fn download(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), AppError> {
        self.downloads
            .push((file_name.to_string(), mime.to_string(), contents.to_string()));
        Ok(())
    }
}

/// Ticker that only counts; clones share the counters.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    next: Rc<Cell<u32>>,
    live: Rc<RefCell<BTreeSet<u32>>>,
}

impl ManualTicker {
    /// Handles started and not yet cancelled.
    pub fn active(&self) -> usize {
        self.live.borrow().len()
    }

    /// Handles ever started.
    pub fn started(&self) -> u32 {
        self.next.get()
    }
}

impl Ticker for ManualTicker {
    type Handle = u32;

    fn start(&mut self, _period_ms: u32) -> u32 {
        let id = self.next.get() + 1;
        self.next.set(id);
        self.live.borrow_mut().insert(id);
        id
    }

    fn cancel(&mut self, handle: u32) {
        self.live.borrow_mut().remove(&handle);
    }
}

/// Upload whose bytes are already in memory.
#[derive(Debug, Clone)]
pub struct FakeFile {
    pub mime: String,
    pub bytes: Result<Vec<u8>, String>,
}

impl FakeFile {
    pub fn png(bytes: &[u8]) -> Self {
        Self {
            mime: "image/png".into(),
            bytes: Ok(bytes.to_vec()),
        }
    }
}

impl UploadedFile for FakeFile {
    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn read_bytes(&self) -> impl Future<Output = Result<Vec<u8>, AppError>> {
        let bytes = self.bytes.clone().map_err(AppError::FileRead);
        async move { bytes }
    }
}

#[derive(Debug, Default)]
pub struct FakeClipboard {
    pub fail: bool,
    pub written: RefCell<Vec<String>>,
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), AppError>> {
        let result = if self.fail {
            Err(AppError::Clipboard("permission denied".into()))
        } else {
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        };
        async move { result }
    }
}

/// Reads like an empty store; every write fails as if the quota were spent.
#[derive(Debug, Clone, Default)]
pub struct FullStore {
    pub rejected: Rc<Cell<usize>>,
}

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        self.rejected.set(self.rejected.get() + 1);
        Err(AppError::Storage("QuotaExceededError".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub type TestApp = App<MemoryStore, RecordingView, ManualTicker>;
pub type FullApp = App<FullStore, RecordingView, ManualTicker>;

/// App over the given store, initialized and rendered.
pub fn started_app(store: MemoryStore) -> TestApp {
    let mut app = App::initialize(
        AppConfig::default(),
        store,
        RecordingView::default(),
        ManualTicker::default(),
    );
    app.render();
    app
}

/// App whose store rejects every save, initialized and rendered.
pub fn full_app() -> FullApp {
    let mut app = App::initialize(
        AppConfig::default(),
        FullStore::default(),
        RecordingView::default(),
        ManualTicker::default(),
    );
    app.render();
    app
}
