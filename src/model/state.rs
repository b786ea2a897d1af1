//! The personalization record — every editable field plus the story gallery.
//!
//! A `LoveState` is built exactly once per page load, either from a persisted
//! snapshot or from the built-in defaults. Fields missing from an older or
//! hand-edited snapshot are filled from the defaults at that point, so the
//! renderer never sees a hole.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_PARTNER1: &str = "Sarah";
pub const DEFAULT_PARTNER2: &str = "Michael";
pub const DEFAULT_START_DATE: &str = "2020-03-15";
pub const DEFAULT_ANNIVERSARY_DATE: &str = "2026-03-15";
pub const DEFAULT_HERO_SUBTITLE: &str = "A love story written in the stars";
pub const DEFAULT_LOVE_QUOTE: &str = "In all the world, there is no heart for me like yours. In all the world, there is no love for you like mine.";
pub const DEFAULT_THEME: &str = "modern";

/// Visual themes the stylesheet defines, in selector order.
pub const THEMES: &[&str] = &["modern", "romantic", "elegant", "nature"];

pub fn is_known_theme(name: &str) -> bool {
    THEMES.contains(&name)
}

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    /// Remote URL or embedded `data:` URL.
    pub image: String,
    pub title: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveState {
    pub partner1: String,
    pub partner2: String,
    pub start_date: String,
    pub anniversary_date: String,
    pub hero_subtitle: String,
    pub love_quote: String,
    pub theme: String,
    pub stories: Vec<Story>,
}

impl Default for LoveState {
    fn default() -> Self {
        Self {
            partner1: DEFAULT_PARTNER1.to_string(),
            partner2: DEFAULT_PARTNER2.to_string(),
            start_date: DEFAULT_START_DATE.to_string(),
            anniversary_date: DEFAULT_ANNIVERSARY_DATE.to_string(),
            hero_subtitle: DEFAULT_HERO_SUBTITLE.to_string(),
            love_quote: DEFAULT_LOVE_QUOTE.to_string(),
            theme: DEFAULT_THEME.to_string(),
            stories: default_stories(),
        }
    }
}

fn default_stories() -> Vec<Story> {
    vec![
        Story {
            id: 1,
            image: "https://images.unsplash.com/photo-1529636849874-e6774cf19564?w=400&h=400&fit=crop&crop=face".to_string(),
            title: "First Date".to_string(),
            date: "March 15, 2020".to_string(),
            description: "The magical evening when it all began. Every love story has a beginning, and ours started with a simple coffee that turned into hours of conversation.".to_string(),
        },
        Story {
            id: 2,
            image: "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=400&h=400&fit=crop&crop=face".to_string(),
            title: "Travel Together".to_string(),
            date: "July 22, 2021".to_string(),
            description: "Exploring the world hand in hand. From mountain tops to ocean shores, we've discovered that the best adventures are the ones we share together.".to_string(),
        },
        Story {
            id: 3,
            image: "https://images.unsplash.com/photo-1516589178581-6cd7833ae3b2?w=400&h=400&fit=crop&crop=face".to_string(),
            title: "Special Moments".to_string(),
            date: "December 5, 2022".to_string(),
            description: "Cherished memories forever in our hearts. The quiet moments, the laughter, the tears of joy - these are the treasures that make our love story unique.".to_string(),
        },
    ]
}

/// Snapshot as found on disk: every field optional, stories kept loose so one
/// bad entry doesn't take the whole gallery down with it.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredSnapshot {
    partner1: Option<String>,
    partner2: Option<String>,
    start_date: Option<String>,
    anniversary_date: Option<String>,
    hero_subtitle: Option<String>,
    love_quote: Option<String>,
    theme: Option<String>,
    stories: Option<Vec<serde_json::Value>>,
}

impl LoveState {
    /// Serialize the full snapshot.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `partner1 & partner2`.
    pub fn couple(&self) -> String {
        format!("{} & {}", self.partner1, self.partner2)
    }

    pub fn find_story(&self, id: i64) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Id for a story created at `now_ms`: the timestamp, bumped past any
    /// existing id so two additions in the same millisecond never collide.
    pub fn next_story_id(&self, now_ms: i64) -> i64 {
        let max = self.stories.iter().map(|s| s.id).max().unwrap_or(0);
        if self.stories.iter().any(|s| s.id == now_ms) || now_ms <= 0 {
            max + 1
        } else {
            now_ms
        }
    }
}

/// Rebuild State from a persisted snapshot, applying defaults for anything
/// missing or blank. A malformed snapshot yields the defaults.
pub fn decode_snapshot(json: &str) -> LoveState {
    let stored: StoredSnapshot = match serde_json::from_str(json) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("ignoring malformed snapshot: {}", e);
            return LoveState::default();
        }
    };

    let defaults = LoveState::default();
    let theme = stored
        .theme
        .filter(|t| is_known_theme(t))
        .unwrap_or(defaults.theme);
    let stories = match stored.stories {
        Some(raw) => decode_stories(raw),
        None => defaults.stories,
    };

    LoveState {
        partner1: non_blank(stored.partner1, defaults.partner1),
        partner2: non_blank(stored.partner2, defaults.partner2),
        start_date: non_blank(stored.start_date, defaults.start_date),
        anniversary_date: non_blank(stored.anniversary_date, defaults.anniversary_date),
        hero_subtitle: non_blank(stored.hero_subtitle, defaults.hero_subtitle),
        love_quote: non_blank(stored.love_quote, defaults.love_quote),
        theme,
        stories,
    }
}

fn non_blank(value: Option<String>, fallback: String) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

/// Keep well-formed stories, dropping the rest, and re-key duplicate ids.
fn decode_stories(raw: Vec<serde_json::Value>) -> Vec<Story> {
    let mut stories: Vec<Story> = raw
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<Story>(v) {
            Ok(story) => Some(story),
            Err(e) => {
                log::warn!("dropping malformed story: {}", e);
                None
            }
        })
        .collect();

    let mut seen = HashSet::new();
    let mut next = stories.iter().map(|s| s.id).max().unwrap_or(0);
    for story in &mut stories {
        if !seen.insert(story.id) {
            next += 1;
            log::warn!("story id {} duplicated, re-keyed to {}", story.id, next);
            story.id = next;
            seen.insert(next);
        }
    }
    stories
}
