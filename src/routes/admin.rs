//! Admin panel controller — panel visibility, committing edited fields,
//! theme selection, reset and the (simulated) share link.

use std::future::Future;

use crate::app::{App, FieldUpdates};
use crate::error::AppError;
use crate::model::countdown::Ticker;
use crate::model::dates;
use crate::model::state::{self, is_known_theme};
use crate::model::store::KeyValueStore;
use crate::routes::util::{get_param, parse_form_body};
use crate::view::{ids, View};

pub const RESET_PROMPT: &str = "Are you sure you want to reset all customizations to the default template? This cannot be undone.";

/// Asynchronous text clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), AppError>>;
}

pub fn toggle_admin<V: View>(view: &mut V) {
    view.toggle_class(ids::ADMIN_PANEL, "open");
}

/// Open the panel and bring the "add a memory" section into view.
pub fn open_story_upload<V: View>(view: &mut V) {
    toggle_admin(view);
    view.scroll_to_child(ids::ADMIN_PANEL, ids::ADMIN_STORY_SECTION);
}

/// Build updates from a committed admin form. Fields missing from the body
/// stay untouched; fields present but blank take their built-in default.
pub fn field_updates(body: &str) -> Result<FieldUpdates, AppError> {
    let params = parse_form_body(body);
    let field = |key: &str, fallback: &str| {
        get_param(&params, key).map(|v| {
            let v = v.trim();
            if v.is_empty() { fallback.to_string() } else { v.to_string() }
        })
    };

    let updates = FieldUpdates {
        partner1: field(ids::PARTNER1, state::DEFAULT_PARTNER1),
        partner2: field(ids::PARTNER2, state::DEFAULT_PARTNER2),
        start_date: field(ids::START_DATE, state::DEFAULT_START_DATE),
        anniversary_date: field(ids::ANNIVERSARY_DATE, state::DEFAULT_ANNIVERSARY_DATE),
        hero_subtitle: field(ids::HERO_SUBTITLE, state::DEFAULT_HERO_SUBTITLE),
        love_quote: field(ids::LOVE_QUOTE, state::DEFAULT_LOVE_QUOTE),
        theme: None,
    };

    for date in [&updates.start_date, &updates.anniversary_date].into_iter().flatten() {
        if dates::parse_iso(date).is_none() {
            return Err(AppError::Validation(format!(
                "\"{}\" is not a valid date (expected YYYY-MM-DD)",
                date
            )));
        }
    }
    Ok(updates)
}

/// Commit the admin form into State.
pub fn commit_fields<S, V, T>(app: &mut App<S, V, T>, body: &str) -> Result<(), AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let updates = field_updates(body)?;
    app.mutate(updates)
}

pub fn change_theme<S, V, T>(app: &mut App<S, V, T>, theme: &str) -> Result<(), AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    if !is_known_theme(theme) {
        return Err(AppError::UnknownTheme(theme.to_string()));
    }
    app.mutate(FieldUpdates {
        theme: Some(theme.to_string()),
        ..FieldUpdates::default()
    })
}

/// Clear the snapshot and reload, if the user confirms. Returns whether the
/// reset went ahead.
pub fn reset<S, V, T>(app: &mut App<S, V, T>) -> Result<bool, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    if !app.view_mut().confirm(RESET_PROMPT) {
        return Ok(false);
    }
    app.clear_snapshot()?;
    log::info!("customizations reset to defaults");
    app.view_mut().reload();
    Ok(true)
}

/// Copy `link` and return the message to show. The link is the page's own
/// URL; there is no hosted read-only copy behind it.
pub async fn share_link<C: Clipboard>(clipboard: &C, link: &str) -> Result<String, AppError> {
    clipboard.write_text(link).await?;
    Ok(format!(
        "Share link copied! (Simulated link: {})\n\nA real read-only link would need the page to be published somewhere first.",
        link
    ))
}
