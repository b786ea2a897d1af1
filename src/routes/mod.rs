//! Command router.
//!
//! The page sends every synchronous command as an HTTP-like request
//! (`method`, `path`, `query`, `body`) and gets a short status fragment back.
//! Routing uses `matchit`, the same router engine that powers Axum. The two
//! commands that have to wait on the browser (reading an upload, writing the
//! clipboard) are separate async exports in `lib.rs`.

pub mod admin;
pub mod export;
pub mod stories;
pub mod util;

use crate::app::App;
use crate::error::AppError;
use crate::model::countdown::Ticker;
use crate::model::store::KeyValueStore;
use crate::view::View;
use util::{get_param, parse_form_body};

/// Returned by the keypress route when the key activated something.
pub const HANDLED: &str = "handled";
pub const IGNORED: &str = "ignored";

fn router() -> matchit::Router<&'static str> {
    let mut router = matchit::Router::new();

    // Admin panel
    router.insert("/api/admin/toggle", "admin_toggle").ok();
    router.insert("/api/admin/fields", "admin_fields").ok();
    router.insert("/api/admin/upload", "admin_upload").ok();
    router.insert("/api/admin/reset", "admin_reset").ok();
    router.insert("/api/theme", "theme").ok();

    // Story gallery
    router.insert("/api/story/open", "story_open").ok();
    router.insert("/api/story/close", "story_close").ok();
    router.insert("/api/story/keypress", "story_keypress").ok();
    router.insert("/api/gallery/scroll", "gallery_scroll").ok();

    router.insert("/api/export", "export").ok();
    router.insert("/api/state", "state").ok();
    router
}

/// Route one command against the app and return the status fragment.
pub fn dispatch<S, V, T>(
    app: &mut App<S, V, T>,
    method: &str,
    path: &str,
    query: &str,
    body: &str,
) -> String
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let router = router();
    let result = match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("admin_toggle", "POST") => {
                admin::toggle_admin(app.view_mut());
                Ok(ok())
            }
            ("admin_fields", "POST") => admin::commit_fields(app, body).map(|_| ok()),
            ("admin_upload", "POST") => {
                admin::open_story_upload(app.view_mut());
                Ok(ok())
            }
            ("admin_reset", "POST") => admin::reset(app).map(|done| {
                if done { ok() } else { "cancelled".to_string() }
            }),
            ("theme", "POST") => {
                let params = parse_form_body(body);
                let theme = get_param(&params, "theme").unwrap_or("");
                admin::change_theme(app, theme).map(|_| ok())
            }

            ("story_open", "POST") => handle_story_open(app, body),
            ("story_close", "POST") => {
                stories::close_story_detail(app.view_mut());
                Ok(ok())
            }
            ("story_keypress", "POST") => handle_story_keypress(app, body),
            ("gallery_scroll", "POST") => handle_gallery_scroll(app, body),

            ("export", "POST") => export::export(app).map(|_| ok()),
            ("state", "GET") => handle_state(app, query),

            _ => return method_not_allowed(),
        },
        Err(_) => return not_found(),
    };

    match result {
        Ok(html) => html,
        Err(e) => {
            log::warn!("{} {} failed: {}", method, path, e);
            if matches!(
                e,
                AppError::Validation(_) | AppError::UnknownTheme(_) | AppError::Storage(_)
            ) {
                app.view_mut().notify(&e.to_string());
            }
            error_fragment(&e)
        }
    }
}

fn handle_story_open<S, V, T>(app: &mut App<S, V, T>, body: &str) -> Result<String, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    // Unknown ids are a silent no-op.
    if let Some(id) = parse_id(body)? {
        if !stories::open_story_detail(app, id) {
            log::debug!("no story with id {}", id);
        }
    }
    Ok(ok())
}

fn handle_story_keypress<S, V, T>(app: &mut App<S, V, T>, body: &str) -> Result<String, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let params = parse_form_body(body);
    let key = get_param(&params, "key").unwrap_or("");
    let id = parse_id(body)?;
    if stories::handle_keypress(app, key, id) {
        Ok(HANDLED.to_string())
    } else {
        Ok(IGNORED.to_string())
    }
}

fn handle_gallery_scroll<S, V, T>(app: &mut App<S, V, T>, body: &str) -> Result<String, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let params = parse_form_body(body);
    let direction = get_param(&params, "direction")
        .and_then(|d| d.trim().parse::<i32>().ok())
        .filter(|d| *d != 0)
        .ok_or_else(|| AppError::Validation("direction must be -1 or 1".to_string()))?;
    let step = app.config().scroll_step_px;
    stories::scroll_gallery(app.view_mut(), direction, step);
    Ok(ok())
}

/// Current snapshot JSON; `?pretty=true` indents it.
fn handle_state<S, V, T>(app: &App<S, V, T>, query: &str) -> Result<String, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let params = util::parse_query(query);
    if get_param(&params, "pretty") == Some("true") {
        Ok(serde_json::to_string_pretty(app.state())?)
    } else {
        Ok(app.state().to_snapshot()?)
    }
}

/// `id=<n>` from a form body. Absent, empty or `null` means no id.
fn parse_id(body: &str) -> Result<Option<i64>, AppError> {
    let params = parse_form_body(body);
    match get_param(&params, "id").map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("\"{}\" is not a story id", raw))),
    }
}

fn ok() -> String {
    "ok".to_string()
}

/// Red status fragment for a failed command.
pub fn error_fragment(e: &AppError) -> String {
    format!(
        r#"<span class="status-error" data-code="{}">{}</span>"#,
        e.code(),
        crate::view::page::escape(&e.to_string())
    )
}

fn not_found() -> String {
    r#"<span class="status-error">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="status-error">405 — method not allowed</span>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::state::LoveState;
    use crate::model::store::MemoryStore;
    use crate::testing::{full_app, started_app};
    use crate::view::ids;

    #[test]
    fn returns_404_for_unknown_route() {
        let mut app = started_app(MemoryStore::new());
        let html = dispatch(&mut app, "POST", "/api/nonexistent", "", "");
        assert!(html.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let mut app = started_app(MemoryStore::new());
        assert!(dispatch(&mut app, "GET", "/api/export", "", "").contains("405"));
        assert!(dispatch(&mut app, "POST", "/api/state", "", "").contains("405"));
    }

    #[test]
    fn routes_admin_fields() {
        let store = MemoryStore::new();
        let mut app = started_app(store.clone());
        let html = dispatch(&mut app, "POST", "/api/admin/fields", "", "partner1=Ana&partner2=Luis");
        assert_eq!(html, "ok");
        assert_eq!(app.state().couple(), "Ana & Luis");
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn failed_save_on_field_commit_tells_the_user() {
        let mut app = full_app();
        let html = dispatch(&mut app, "POST", "/api/admin/fields", "", "partner1=Ana");
        assert!(html.contains("E_STORAGE"));
        assert_eq!(app.state().partner1, "Sarah");
        assert_eq!(
            app.view().notices,
            vec!["storage unavailable: QuotaExceededError".to_string()]
        );
    }

    #[test]
    fn invalid_fields_come_back_as_error_fragment() {
        let mut app = started_app(MemoryStore::new());
        let html = dispatch(&mut app, "POST", "/api/admin/fields", "", "startDate=soon");
        assert!(html.contains("status-error"));
        assert!(html.contains("E_VALIDATION"));
        assert_eq!(app.state(), &LoveState::default());
        assert_eq!(app.view().notices.len(), 1);
    }

    #[test]
    fn routes_theme() {
        let mut app = started_app(MemoryStore::new());
        assert_eq!(dispatch(&mut app, "POST", "/api/theme", "", "theme=elegant"), "ok");
        assert_eq!(app.view().theme.as_deref(), Some("elegant"));

        let html = dispatch(&mut app, "POST", "/api/theme", "", "theme=neon");
        assert!(html.contains("E_THEME"));
        assert_eq!(app.state().theme, "elegant");
    }

    #[test]
    fn routes_admin_toggle_and_upload() {
        let mut app = started_app(MemoryStore::new());
        dispatch(&mut app, "POST", "/api/admin/toggle", "", "");
        assert!(app.view().has_class(ids::ADMIN_PANEL, "open"));
        dispatch(&mut app, "POST", "/api/admin/toggle", "", "");
        dispatch(&mut app, "POST", "/api/admin/upload", "", "");
        assert!(app.view().has_class(ids::ADMIN_PANEL, "open"));
        assert_eq!(app.view().scrolled_to.len(), 1);
    }

    #[test]
    fn routes_admin_reset_respects_confirmation() {
        let mut app = started_app(MemoryStore::new());
        assert_eq!(dispatch(&mut app, "POST", "/api/admin/reset", "", ""), "cancelled");
        app.view_mut().confirm_answer = true;
        assert_eq!(dispatch(&mut app, "POST", "/api/admin/reset", "", ""), "ok");
        assert_eq!(app.view().reloads, 1);
    }

    #[test]
    fn routes_story_open_and_close() {
        let mut app = started_app(MemoryStore::new());
        assert_eq!(dispatch(&mut app, "POST", "/api/story/open", "", "id=2"), "ok");
        assert!(app.view().has_class(ids::STORY_MODAL, "open"));
        dispatch(&mut app, "POST", "/api/story/close", "", "");
        assert!(!app.view().has_class(ids::STORY_MODAL, "open"));
    }

    #[test]
    fn story_open_with_unknown_id_is_ignored() {
        let mut app = started_app(MemoryStore::new());
        assert_eq!(dispatch(&mut app, "POST", "/api/story/open", "", "id=99"), "ok");
        assert!(!app.view().has_class(ids::STORY_MODAL, "open"));
        assert!(app.view().notices.is_empty());
    }

    #[test]
    fn routes_story_keypress() {
        let mut app = started_app(MemoryStore::new());
        assert_eq!(
            dispatch(&mut app, "POST", "/api/story/keypress", "", "key=Enter&id=1"),
            HANDLED
        );
        assert!(app.view().has_class(ids::STORY_MODAL, "open"));
        assert_eq!(
            dispatch(&mut app, "POST", "/api/story/keypress", "", "key=a&id=1"),
            IGNORED
        );
        assert_eq!(
            dispatch(&mut app, "POST", "/api/story/keypress", "", "key=+&id=null"),
            HANDLED
        );
        assert!(app.view().has_class(ids::ADMIN_PANEL, "open"));
    }

    #[test]
    fn routes_gallery_scroll() {
        let mut app = started_app(MemoryStore::new());
        dispatch(&mut app, "POST", "/api/gallery/scroll", "", "direction=-1");
        dispatch(&mut app, "POST", "/api/gallery/scroll", "", "direction=1");
        assert_eq!(
            app.view().scrolls,
            vec![
                (ids::STORIES_SCROLL.to_string(), -300),
                (ids::STORIES_SCROLL.to_string(), 300)
            ]
        );
        let html = dispatch(&mut app, "POST", "/api/gallery/scroll", "", "direction=sideways");
        assert!(html.contains("E_VALIDATION"));
    }

    #[test]
    fn routes_export() {
        let mut app = started_app(MemoryStore::new());
        assert_eq!(dispatch(&mut app, "POST", "/api/export", "", ""), "ok");
        assert_eq!(app.view().downloads.len(), 1);
    }

    #[test]
    fn routes_state_returns_snapshot() {
        let mut app = started_app(MemoryStore::new());
        let json = dispatch(&mut app, "GET", "/api/state", "", "");
        assert!(json.contains(r#""partner1":"Sarah""#));
        assert!(json.contains(r#""stories":["#));

        let pretty = dispatch(&mut app, "GET", "/api/state", "?pretty=true", "");
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<LoveState>(&pretty).unwrap(),
            serde_json::from_str::<LoveState>(&json).unwrap()
        );
    }
}
