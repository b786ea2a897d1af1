//! Love Story in-browser WASM app.
//!
//! `start` mounts the page and loads the saved customizations. After that
//! the page calls `handle_request(method, path, query, body)` for every
//! synchronous command (see `routes`), plus two async exports for the flows
//! that wait on the browser: `add_story` (reads an uploaded photo) and
//! `share_link` (writes the clipboard).
//!
//! The app lives in a thread-local `Rc<RefCell<_>>` so async flows can hold
//! a handle across an `.await` without keeping it borrowed.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod view;

#[cfg(test)]
mod testing;

use app::App;
use browser::{DomView, IntervalTicker, LocalStorage, NavigatorClipboard};
use config::AppConfig;
use error::AppError;
use view::page::{self, Mode};
use view::{ids, View};

type BrowserApp = App<LocalStorage, DomView, IntervalTicker>;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<BrowserApp>>>> = const { RefCell::new(None) };
}

fn app_handle() -> Option<Rc<RefCell<BrowserApp>>> {
    APP.with(|cell| cell.borrow().clone())
}

fn with_app<R>(f: impl FnOnce(&mut BrowserApp) -> R) -> Result<R, AppError> {
    let app = app_handle().ok_or(AppError::NotStarted)?;
    let mut app = app
        .try_borrow_mut()
        .map_err(|_| AppError::Dom("app is busy".to_string()))?;
    Ok(f(&mut *app))
}

fn to_js(e: AppError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", e.code(), e))
}

/// Mount the page and render the saved (or default) love story.
///
/// `config_json` overrides `AppConfig` fields; omitted fields keep their
/// defaults. Calling `start` twice is a no-op.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_json(config_json.as_deref().unwrap_or(""));
    let level = config.as_ref().map_or(log::Level::Info, AppConfig::level);
    let _ = console_log::init_with_level(level);
    let config = config.map_err(to_js)?;

    if app_handle().is_some() {
        log::warn!("start called twice, ignoring");
        return Ok(());
    }

    let view = DomView::new().map_err(to_js)?;
    let threshold = config.sticky_nav_threshold_px;
    let particle_count = config.particle_count;
    let mut app = App::initialize(
        config,
        LocalStorage::open(),
        view,
        IntervalTicker::new(on_countdown_tick),
    );

    let layout = page::layout_particles(particle_count, js_sys::Math::random);
    let body = page::body(app.state(), Mode::Live, &page::particles(&layout));
    app.view().mount(&body, page::STYLESHEET).map_err(to_js)?;
    app.render();

    APP.with(|cell| *cell.borrow_mut() = Some(Rc::new(RefCell::new(app))));
    install_sticky_nav(threshold).map_err(to_js)?;
    log::info!("love story started");
    Ok(())
}

fn install_sticky_nav(threshold_px: f64) -> Result<(), AppError> {
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        let _ = with_app(|app| {
            let scrolled = app.view().scroll_y() > threshold_px;
            app.view_mut().set_class(ids::NAVBAR, "scrolled", scrolled);
        });
    });
    browser::window()?
        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        .map_err(browser::dom_error)?;
    on_scroll.forget();
    Ok(())
}

fn on_countdown_tick() {
    let Some(app) = app_handle() else { return };
    match app.try_borrow_mut() {
        Ok(mut app) => {
            app.countdown_tick(js_sys::Date::now() as i64);
        }
        Err(_) => log::warn!("countdown tick skipped, app busy"),
    }
}

/// Process a command and return a status fragment.
///
/// # Arguments
/// * `method` — `GET` or `POST`
/// * `path`   — route, e.g. `/api/theme`
/// * `query`  — query string, e.g. `?pretty=true`
/// * `body`   — URL-encoded form body; empty for GET
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    with_app(|app| routes::dispatch(app, method, path, query, body))
        .unwrap_or_else(|e| routes::error_fragment(&e))
}

/// Add a story from the admin form. `file` is the picked photo, if any; it
/// takes precedence over the image URL field.
#[wasm_bindgen]
pub async fn add_story(form: String, file: Option<web_sys::File>) -> String {
    let Some(app) = app_handle() else {
        return routes::error_fragment(&AppError::NotStarted);
    };
    let clock = || js_sys::Date::now() as i64;
    match routes::stories::add_story(&*app, &form, file.as_ref(), clock).await {
        Ok(_) => "ok".to_string(),
        Err(e) => routes::error_fragment(&e),
    }
}

/// Copy the page link to the clipboard and tell the user.
#[wasm_bindgen]
pub async fn share_link() -> String {
    let link = match with_app(|app| app.view().location()) {
        Ok(link) => link,
        Err(e) => return routes::error_fragment(&e),
    };
    match routes::admin::share_link(&NavigatorClipboard, &link).await {
        Ok(message) => {
            let _ = with_app(|app| app.view_mut().notify(&message));
            message
        }
        Err(e) => {
            log::warn!("{}", e);
            routes::error_fragment(&e)
        }
    }
}

/// The current snapshot as JSON.
#[wasm_bindgen]
pub fn snapshot() -> Result<String, JsValue> {
    with_app(|app| app.state().to_snapshot())
        .map_err(to_js)?
        .map_err(|e| to_js(e.into()))
}
