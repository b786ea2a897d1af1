//! Story gallery controller — adding stories (with optional photo upload),
//! the detail overlay, keyboard activation and strip scrolling.
//!
//! Adding a story is the only asynchronous flow in the app: an uploaded photo
//! has to be read and turned into a `data:` URL before the story exists. The
//! app is borrowed only on either side of that read, never across it, so timer
//! ticks that land in the meantime still get through.

use std::cell::RefCell;
use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::app::App;
use crate::error::AppError;
use crate::model::countdown::Ticker;
use crate::model::dates;
use crate::model::state::Story;
use crate::model::store::KeyValueStore;
use crate::routes::admin;
use crate::routes::util::{get_param, parse_form_body};
use crate::view::{ids, View};

pub const MISSING_FIELDS: &str =
    "Please fill out all story fields and provide an image URL or upload a file.";
pub const STORY_ADDED: &str = "Story added successfully! \u{1F389}";

/// A file picked in the upload input.
pub trait UploadedFile {
    /// MIME type reported by the browser; may be empty.
    fn mime_type(&self) -> String;
    fn read_bytes(&self) -> impl Future<Output = Result<Vec<u8>, AppError>>;
}

/// The add-story form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryDraft {
    pub title: String,
    pub date: String,
    pub description: String,
    pub image_url: String,
}

impl StoryDraft {
    pub fn from_form(body: &str) -> Self {
        let params = parse_form_body(body);
        let get = |key: &str| get_param(&params, key).unwrap_or("").trim().to_string();
        Self {
            title: get(ids::STORY_TITLE),
            date: get(ids::STORY_DATE),
            description: get(ids::STORY_DESCRIPTION),
            image_url: get(ids::STORY_IMAGE_URL),
        }
    }

    /// Every text field is required, plus a URL or an uploaded file.
    pub fn validate(&self, has_file: bool) -> Result<(), AppError> {
        let missing_text = self.title.is_empty() || self.date.is_empty() || self.description.is_empty();
        if missing_text || (self.image_url.is_empty() && !has_file) {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        }
        Ok(())
    }

    fn into_story(self, id: i64, image: String) -> Story {
        Story {
            id,
            image,
            title: self.title,
            date: self.date,
            description: self.description,
        }
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// The image source for a draft. An uploaded file wins over a URL.
pub async fn resolve_image<F: UploadedFile>(
    draft: &StoryDraft,
    file: Option<&F>,
) -> Result<String, AppError> {
    match file {
        Some(file) => {
            let bytes = file.read_bytes().await?;
            log::debug!("converted {} byte upload to data URL", bytes.len());
            Ok(data_url(&file.mime_type(), &bytes))
        }
        None => Ok(draft.image_url.clone()),
    }
}

/// Append a validated story, then clear the form. Returns the new id.
pub fn commit_story<S, V, T>(
    app: &mut App<S, V, T>,
    draft: StoryDraft,
    image: String,
    now_ms: i64,
) -> Result<i64, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let id = app.state().next_story_id(now_ms);
    app.add_story(draft.into_story(id, image))?;

    let view = app.view_mut();
    for input in ids::STORY_FORM {
        view.set_value(input, "");
    }
    view.notify(STORY_ADDED);
    log::info!("story {} added", id);
    Ok(id)
}

/// Full add-story flow: validate, read the upload if any, append.
///
/// Any failure is shown to the user and leaves State untouched; the form
/// keeps its contents so the user can try again.
pub async fn add_story<S, V, T, F>(
    app: &RefCell<App<S, V, T>>,
    body: &str,
    file: Option<&F>,
    clock: impl Fn() -> i64,
) -> Result<i64, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
    F: UploadedFile,
{
    let draft = StoryDraft::from_form(body);
    if let Err(e) = draft.validate(file.is_some()) {
        app.borrow_mut().view_mut().notify(&e.to_string());
        return Err(e);
    }

    let image = match resolve_image(&draft, file).await {
        Ok(image) => image,
        Err(e) => {
            app.borrow_mut().view_mut().notify(&e.to_string());
            return Err(e);
        }
    };

    let mut app = app.borrow_mut();
    let committed = commit_story(&mut *app, draft, image, clock());
    if let Err(e) = &committed {
        app.view_mut().notify(&e.to_string());
    }
    committed
}

/// Show story `id` in the detail overlay. Unknown ids are ignored.
pub fn open_story_detail<S, V, T>(app: &mut App<S, V, T>, id: i64) -> bool
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let Some(story) = app.state().find_story(id).cloned() else {
        return false;
    };

    let view = app.view_mut();
    view.set_image(ids::STORY_MODAL_IMAGE, &story.image, &story.title);
    view.set_text(ids::STORY_MODAL_TITLE, &story.title);
    view.set_text(ids::STORY_MODAL_DATE, &dates::format_long(&story.date));
    view.set_text(ids::STORY_MODAL_DESCRIPTION, &story.description);
    view.set_class(ids::STORY_MODAL, "open", true);
    true
}

pub fn close_story_detail<V: View>(view: &mut V) {
    view.set_class(ids::STORY_MODAL, "open", false);
}

/// Scroll the strip one step left (`direction < 0`) or right.
pub fn scroll_gallery<V: View>(view: &mut V, direction: i32, step_px: i32) {
    view.scroll_by(ids::STORIES_SCROLL, direction.signum() * step_px);
}

/// Enter and Space activate a focused story item.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Keyboard activation: a story item opens its detail, the add-story card
/// (`id == None`) opens the upload form. Returns whether the key was used.
pub fn handle_keypress<S, V, T>(app: &mut App<S, V, T>, key: &str, id: Option<i64>) -> bool
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    if !is_activation_key(key) {
        return false;
    }
    match id {
        Some(id) => {
            open_story_detail(app, id);
        }
        None => admin::open_story_upload(app.view_mut()),
    }
    true
}
