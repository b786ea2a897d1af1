//! Renderer — projects `LoveState` onto the live document.
//!
//! Idempotent: every call rewrites the display text, the admin form values,
//! the theme marker and the full story strip. Restarting the countdown timer
//! is the caller's half of a render pass (see `App::render`), since the
//! timer handle lives on the app.

use crate::model::dates;
use crate::model::state::{LoveState, Story};
use crate::view::page::{self, Mode};
use crate::view::{ids, View};

/// Display strings derived from the raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    /// `S & M`
    pub initials: String,
    pub couple: String,
    /// Year from `startDate`, or the raw value if it doesn't parse.
    pub since: String,
    pub hero_badge: String,
    pub footer_names: String,
}

impl Derived {
    pub fn from_state(state: &LoveState) -> Self {
        let since = dates::year_of(&state.start_date)
            .map(|y| y.to_string())
            .unwrap_or_else(|| state.start_date.clone());
        let couple = state.couple();
        Self {
            initials: format!("{} & {}", initial(&state.partner1), initial(&state.partner2)),
            hero_badge: format!("\u{2728} Together Since {}", since),
            footer_names: format!("{} \u{2014} Together Since {}", couple, since),
            couple,
            since,
        }
    }
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

/// Stable ascending sort by story date; unparseable dates go last.
pub fn sort_stories(stories: &mut [Story]) {
    stories.sort_by(|a, b| dates::compare_story_dates(&a.date, &b.date));
}

/// Rewrite every State-derived part of the page.
///
/// Sorting happens here and is written back to `state.stories`, so the stored
/// order follows the render order from the next save on.
pub fn render<V: View>(state: &mut LoveState, view: &mut V) {
    let derived = Derived::from_state(state);

    view.set_text(ids::LOGO_TEXT, &derived.initials);
    view.set_text(ids::HERO_BADGE, &derived.hero_badge);
    view.set_text(ids::HERO_TITLE, &derived.couple);
    view.set_text(ids::HERO_SUBTITLE_TEXT, &state.hero_subtitle);
    view.set_text(ids::FOOTER_QUOTE, &state.love_quote);
    view.set_text(ids::FOOTER_NAMES, &derived.footer_names);

    view.set_value(ids::PARTNER1, &state.partner1);
    view.set_value(ids::PARTNER2, &state.partner2);
    view.set_value(ids::START_DATE, &state.start_date);
    view.set_value(ids::ANNIVERSARY_DATE, &state.anniversary_date);
    view.set_value(ids::HERO_SUBTITLE, &state.hero_subtitle);
    view.set_value(ids::LOVE_QUOTE, &state.love_quote);

    sort_stories(&mut state.stories);
    view.set_html(ids::STORIES_SCROLL, &page::story_strip(&state.stories, Mode::Live));

    view.set_theme(&state.theme);
    view.mark_active_theme(&state.theme);
}
