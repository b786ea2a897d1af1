//! Static export — a standalone, read-only copy of the page as a download.
//!
//! The file is rendered from the same templates as the live page in
//! `Mode::Export`: no admin panel, toggle, watermark or add-story card, and
//! handlers call plain globals instead of `app.*`. Those globals come from
//! the inlined behaviors, whose data (anniversary date, stories) is frozen
//! at export time.

use crate::app::App;
use crate::error::AppError;
use crate::model::countdown::Ticker;
use crate::model::store::KeyValueStore;
use crate::view::behaviors::{self, Behavior, EmbeddedStory};
use crate::view::page::{self, Mode};
use crate::view::View;

pub const EXPORT_MIME: &str = "text/html";
pub const EXPORTED: &str = "\u{2705} Client-ready HTML downloaded! The file includes all current content without the admin panel.";

/// `<prefix>_<partner1>_<partner2>.html`. Characters that file systems
/// commonly reject are replaced with `-`.
pub fn file_name(prefix: &str, partner1: &str, partner2: &str) -> String {
    format!(
        "{}_{}_{}.html",
        prefix,
        file_safe(partner1),
        file_safe(partner2)
    )
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Render the standalone document for the app's current State.
pub fn render_export<S, V, T>(app: &App<S, V, T>) -> Result<String, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let state = app.state();
    let config = app.config();

    let script = behaviors::inline_script(&[
        Behavior::Countdown {
            anniversary_date: state.anniversary_date.clone(),
            marker: config.celebration_marker.clone(),
            period_ms: config.tick_period_ms,
        },
        Behavior::StickyNav {
            threshold_px: config.sticky_nav_threshold_px,
        },
        Behavior::StoryDetail {
            stories: state.stories.iter().map(EmbeddedStory::from).collect(),
        },
        Behavior::GalleryScroll {
            step_px: config.scroll_step_px,
        },
        Behavior::Particles {
            count: config.particle_count,
        },
    ])?;

    Ok(page::document(state, Mode::Export, "", &script))
}

/// Render and hand the file to the browser. Returns the file name.
pub fn export<S, V, T>(app: &mut App<S, V, T>) -> Result<String, AppError>
where
    S: KeyValueStore,
    V: View,
    T: Ticker,
{
    let html = render_export(app)?;
    let state = app.state();
    let name = file_name(&app.config().export_prefix, &state.partner1, &state.partner2);

    app.view_mut().download(&name, EXPORT_MIME, &html)?;
    app.view_mut().notify(EXPORTED);
    log::info!("exported {} ({} bytes)", name, html.len());
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::MemoryStore;
    use crate::routes::admin;
    use crate::testing::started_app;

    #[test]
    fn file_name_uses_both_partners() {
        assert_eq!(file_name("LoveStory", "Sarah", "Michael"), "LoveStory_Sarah_Michael.html");
        assert_eq!(file_name("LoveStory", "A/B", "C:D"), "LoveStory_A-B_C-D.html");
    }

    #[test]
    fn export_downloads_a_read_only_document() {
        let mut app = started_app(MemoryStore::new());
        let name = export(&mut app).unwrap();
        assert_eq!(name, "LoveStory_Sarah_Michael.html");

        let (file, mime, html) = &app.view().downloads[0];
        assert_eq!(file, &name);
        assert_eq!(mime, "text/html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("id=\"adminPanel\""));
        assert!(!html.contains("class=\"admin-toggle\""));
        assert!(!html.contains("class=\"watermark\""));
        assert!(!html.contains("add-story\""));
        assert!(!html.contains("onclick=\"app."));
        assert!(html.contains(r#"onclick="openStoryModal(1)""#));
        assert!(html.contains(r#""anniversaryDate":"2026-03-15""#));
        assert!(html.contains("window.closeStoryModal"));
        assert!(html.contains("window.scrollStories"));
        assert_eq!(app.view().notices.last().map(String::as_str), Some(EXPORTED));
    }

    #[test]
    fn export_reflects_current_edits() {
        let mut app = started_app(MemoryStore::new());
        admin::commit_fields(&mut app, "partner1=Ana&partner2=Luis&anniversaryDate=2027-09-09").unwrap();
        admin::change_theme(&mut app, "nature").unwrap();

        let html = render_export(&app).unwrap();
        assert!(html.contains("Ana &amp; Luis"));
        assert!(html.contains(r#"<body data-theme="nature">"#));
        assert!(html.contains(r#""anniversaryDate":"2027-09-09""#));
        assert_eq!(export(&mut app).unwrap(), "LoveStory_Ana_Luis.html");
    }

    #[test]
    fn export_does_not_touch_state_or_storage() {
        let store = MemoryStore::new();
        let mut app = started_app(store.clone());
        let before = app.state().clone();
        export(&mut app).unwrap();
        assert_eq!(app.state(), &before);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn story_text_cannot_break_out_of_the_script() {
        let mut app = started_app(MemoryStore::new());
        admin::commit_fields(&mut app, "partner1=Ana").unwrap();
        let body = "storyTitle=%3C%2Fscript%3E&storyDate=2025-01-01&storyDescription=B&storyImageURL=u";
        let app = std::cell::RefCell::new(app);
        futures::executor::block_on(crate::routes::stories::add_story(
            &app,
            body,
            None::<&crate::testing::FakeFile>,
            || 42,
        ))
        .unwrap();

        let html = render_export(&*app.borrow()).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
