//! Read-only behaviors inlined into the exported file.
//!
//! Each behavior is a fixed script body wrapped in an IIFE that receives its
//! data as a JSON literal. Only data is spliced into the output; the code
//! itself never varies with State.

use serde::Serialize;

use crate::model::dates;
use crate::model::state::Story;

/// Story as embedded in the exported detail view, with its label pre-rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedStory {
    pub id: i64,
    pub image: String,
    pub title: String,
    pub date_label: String,
    pub description: String,
}

impl From<&Story> for EmbeddedStory {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id,
            image: story.image.clone(),
            title: story.title.clone(),
            date_label: dates::format_long(&story.date),
            description: story.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Behavior {
    /// Ticks toward `anniversaryDate`, rolling it a year forward in memory on
    /// expiry.
    #[serde(rename_all = "camelCase")]
    Countdown {
        anniversary_date: String,
        marker: String,
        period_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    StickyNav { threshold_px: f64 },
    /// `openStoryModal`, `closeStoryModal`, `handleStoryKeypress`.
    StoryDetail { stories: Vec<EmbeddedStory> },
    /// `scrollStories`.
    #[serde(rename_all = "camelCase")]
    GalleryScroll { step_px: i32 },
    Particles { count: usize },
}

const COUNTDOWN_JS: &str = r#"(function (cfg) {
  var target = cfg.anniversaryDate;
  var ids = ['days', 'hours', 'minutes', 'seconds'];
  function set(id, text) { var el = document.getElementById(id); if (el) el.textContent = text; }
  function pad(n) { return n.toString().padStart(2, '0'); }
  function tick() {
    var distance = new Date(target + 'T00:00:00Z').getTime() - Date.now();
    if (distance < 0) {
      ids.forEach(function (id) { set(id, cfg.marker); });
      var next = new Date(target + 'T00:00:00Z');
      next.setUTCFullYear(new Date().getUTCFullYear() + 1);
      target = next.toISOString().split('T')[0];
      return;
    }
    var days = Math.floor(distance / 86400000);
    set('days', days < 1000 ? String(days) : days.toLocaleString('en-US'));
    set('hours', pad(Math.floor((distance % 86400000) / 3600000)));
    set('minutes', pad(Math.floor((distance % 3600000) / 60000)));
    set('seconds', pad(Math.floor((distance % 60000) / 1000)));
  }
  tick();
  setInterval(tick, cfg.periodMs);
})"#;

const STICKY_NAV_JS: &str = r#"(function (cfg) {
  window.addEventListener('scroll', function () {
    var navbar = document.getElementById('navbar');
    if (!navbar) return;
    if (window.scrollY > cfg.thresholdPx) navbar.classList.add('scrolled');
    else navbar.classList.remove('scrolled');
  });
})"#;

const STORY_DETAIL_JS: &str = r#"(function (cfg) {
  window.openStoryModal = function (id) {
    var story = cfg.stories.find(function (s) { return s.id === id; });
    if (!story) return;
    var img = document.getElementById('storyModalImage');
    img.src = story.image;
    img.alt = story.title;
    document.getElementById('storyModalTitle').textContent = story.title;
    document.getElementById('storyModalDate').textContent = story.dateLabel;
    document.getElementById('storyModalDescription').textContent = story.description;
    document.getElementById('storyModal').classList.add('open');
  };
  window.closeStoryModal = function () {
    document.getElementById('storyModal').classList.remove('open');
  };
  window.handleStoryKeypress = function (event, id) {
    if (event.key === 'Enter' || event.key === ' ') {
      event.preventDefault();
      if (id) window.openStoryModal(id);
    }
  };
})"#;

const GALLERY_SCROLL_JS: &str = r#"(function (cfg) {
  window.scrollStories = function (direction) {
    var strip = document.getElementById('storiesScroll');
    if (strip) strip.scrollBy({ left: direction * cfg.stepPx, behavior: 'smooth' });
  };
})"#;

const PARTICLES_JS: &str = r#"(function (cfg) {
  var container = document.getElementById('particles');
  if (!container) return;
  container.innerHTML = '';
  for (var i = 0; i < cfg.count; i++) {
    var particle = document.createElement('div');
    particle.classList.add('particle');
    particle.style.left = Math.random() * 100 + 'vw';
    particle.style.animationDelay = Math.random() * 6 + 's';
    particle.style.opacity = '0';
    container.appendChild(particle);
  }
})"#;

impl Behavior {
    fn code(&self) -> &'static str {
        match self {
            Behavior::Countdown { .. } => COUNTDOWN_JS,
            Behavior::StickyNav { .. } => STICKY_NAV_JS,
            Behavior::StoryDetail { .. } => STORY_DETAIL_JS,
            Behavior::GalleryScroll { .. } => GALLERY_SCROLL_JS,
            Behavior::Particles { .. } => PARTICLES_JS,
        }
    }

    /// `(code)(data);`
    pub fn script(&self) -> Result<String, serde_json::Error> {
        let data = json_literal(self)?;
        Ok(format!("{}({});\n", self.code(), data))
    }
}

/// JSON that is safe to place inside a `<script>` element.
pub fn json_literal<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Concatenate the scripts of all `behaviors`, in order.
pub fn inline_script(behaviors: &[Behavior]) -> Result<String, serde_json::Error> {
    let mut out = String::from("'use strict';\n");
    for behavior in behaviors {
        out.push_str(&behavior.script()?);
    }
    Ok(out)
}
