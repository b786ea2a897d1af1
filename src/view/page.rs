//! Page templates.
//!
//! The live page and the exported file are rendered from the same markup.
//! `Mode` decides which parts exist (admin panel, toggle, watermark, add-story
//! card) and which namespace event-handler attributes call into: `app.` on the
//! live page, bare globals in the export.

use crate::model::dates;
use crate::model::state::{LoveState, Story, THEMES};
use crate::view::ids;
use crate::view::render::Derived;

pub const STYLESHEET: &str = include_str!("../../assets/style.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The editable page, wired to the `app` namespace.
    Live,
    /// Read-only standalone file.
    Export,
}

impl Mode {
    /// Handler attribute text for a call such as `openStoryModal(3)`.
    pub fn call(self, call: &str) -> String {
        match self {
            Mode::Live => format!("app.{}", call),
            Mode::Export => call.to_string(),
        }
    }

    fn editable(self) -> bool {
        self == Mode::Live
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Story strip ────────────────────────────────────────────────────

/// Children of the story strip, in the order given.
pub fn story_strip(stories: &[Story], mode: Mode) -> String {
    let mut html = String::with_capacity(512 + stories.len() * 512);

    if mode.editable() {
        html.push_str(&format!(
            r#"<div class="story-item add-story" role="listitem" tabindex="0" onclick="{}" onkeypress="{}">"#,
            mode.call("openStoryUpload()"),
            mode.call("handleStoryKeypress(event, null)"),
        ));
        html.push_str(r#"<div class="story-avatar add-avatar"><span class="add-icon">+</span></div>"#);
        html.push_str(r#"<div class="story-title">Add Memory</div>"#);
        html.push_str(r#"</div>"#);
    }

    for story in stories {
        html.push_str(&story_item(story, mode));
    }
    html
}

fn story_item(story: &Story, mode: Mode) -> String {
    let title = escape(&story.title);
    format!(
        concat!(
            r#"<div class="story-item" role="listitem" tabindex="0" onclick="{onclick}" onkeypress="{onkeypress}">"#,
            r#"<div class="story-avatar"><img class="story-image" src="{src}" alt="{title}" loading="lazy"></div>"#,
            r#"<div class="story-title">{title}</div>"#,
            r#"<div class="story-date">{date}</div>"#,
            r#"</div>"#,
        ),
        onclick = mode.call(&format!("openStoryModal({})", story.id)),
        onkeypress = mode.call(&format!("handleStoryKeypress(event, {})", story.id)),
        src = escape(&story.image),
        title = title,
        date = escape(&dates::format_short(&story.date)),
    )
}

// ── Particles ──────────────────────────────────────────────────────

/// One decorative background particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub left_vw: f64,
    pub delay_s: f64,
}

/// Scatter `count` particles using `random` (uniform in `[0, 1)`).
pub fn layout_particles(count: usize, mut random: impl FnMut() -> f64) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            left_vw: random() * 100.0,
            delay_s: random() * 6.0,
        })
        .collect()
}

pub fn particles(layout: &[Particle]) -> String {
    let mut html = String::with_capacity(layout.len() * 96);
    for p in layout {
        html.push_str(&format!(
            r#"<div class="particle" style="left: {:.2}vw; animation-delay: {:.2}s; opacity: 0"></div>"#,
            p.left_vw, p.delay_s
        ));
    }
    html
}

// ── Admin panel ────────────────────────────────────────────────────

pub fn theme_options(active: &str, mode: Mode) -> String {
    let mut html = String::with_capacity(THEMES.len() * 160);
    for &theme in THEMES {
        let class = if theme == active {
            "theme-option active"
        } else {
            "theme-option"
        };
        html.push_str(&format!(
            r#"<button type="button" class="{class}" data-theme="{theme}" onclick="{call}" aria-label="{theme} theme">{label}</button>"#,
            class = class,
            theme = theme,
            call = mode.call(&format!("changeTheme('{}')", theme)),
            label = capitalize(theme),
        ));
    }
    html
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn text_input(id: &str, label: &str, kind: &str, value: &str) -> String {
    format!(
        r#"<label class="admin-label" for="{id}">{label}</label><input class="admin-input" type="{kind}" id="{id}" value="{value}">"#,
        id = id,
        label = label,
        kind = kind,
        value = escape(value),
    )
}

fn admin_panel(state: &LoveState, mode: Mode) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(&format!(
        r#"<aside class="admin-panel" id="{}" aria-label="Customize your page">"#,
        ids::ADMIN_PANEL
    ));
    html.push_str(r#"<div class="admin-header"><h2>Customize</h2>"#);
    html.push_str(&format!(
        r#"<button class="admin-close" onclick="{}" aria-label="Close">&times;</button></div>"#,
        mode.call("toggleAdmin()")
    ));

    html.push_str(r#"<div class="admin-section"><h3>Names</h3>"#);
    html.push_str(&text_input(ids::PARTNER1, "Partner 1", "text", &state.partner1));
    html.push_str(&text_input(ids::PARTNER2, "Partner 2", "text", &state.partner2));
    html.push_str(r#"</div>"#);

    html.push_str(r#"<div class="admin-section"><h3>Dates</h3>"#);
    html.push_str(&text_input(ids::START_DATE, "Together since", "date", &state.start_date));
    html.push_str(&text_input(
        ids::ANNIVERSARY_DATE,
        "Next anniversary",
        "date",
        &state.anniversary_date,
    ));
    html.push_str(r#"</div>"#);

    html.push_str(r#"<div class="admin-section"><h3>Words</h3>"#);
    html.push_str(&text_input(ids::HERO_SUBTITLE, "Subtitle", "text", &state.hero_subtitle));
    html.push_str(&format!(
        r#"<label class="admin-label" for="{id}">Love quote</label><textarea class="admin-input" id="{id}" rows="3">{value}</textarea>"#,
        id = ids::LOVE_QUOTE,
        value = escape(&state.love_quote),
    ));
    html.push_str(r#"</div>"#);

    html.push_str(r#"<div class="admin-section"><h3>Theme</h3><div class="theme-options">"#);
    html.push_str(&theme_options(&state.theme, mode));
    html.push_str(r#"</div></div>"#);

    html.push_str(&format!(
        r#"<div class="admin-section" id="{}"><h3>Add a memory</h3>"#,
        ids::ADMIN_STORY_SECTION
    ));
    html.push_str(&text_input(ids::STORY_IMAGE_URL, "Image URL", "url", ""));
    html.push_str(&format!(
        r#"<label class="admin-label" for="{id}">…or upload a photo</label><input class="admin-input" type="file" id="{id}" accept="image/*">"#,
        id = ids::STORY_IMAGE_UPLOAD
    ));
    html.push_str(&text_input(ids::STORY_TITLE, "Title", "text", ""));
    html.push_str(&text_input(ids::STORY_DATE, "Date", "date", ""));
    html.push_str(&format!(
        r#"<label class="admin-label" for="{id}">Description</label><textarea class="admin-input" id="{id}" rows="3"></textarea>"#,
        id = ids::STORY_DESCRIPTION
    ));
    html.push_str(&format!(
        r#"<button class="admin-btn primary" onclick="{}">Add Story</button></div>"#,
        mode.call("addStory()")
    ));

    html.push_str(r#"<div class="admin-section admin-actions"><h3>Deliver</h3>"#);
    html.push_str(&format!(
        r#"<button class="admin-btn primary" onclick="{}">Export HTML</button>"#,
        mode.call("exportHTML()")
    ));
    html.push_str(&format!(
        r#"<button class="admin-btn" onclick="{}">Copy Share Link</button>"#,
        mode.call("shareLink()")
    ));
    html.push_str(&format!(
        r#"<button class="admin-btn danger" onclick="{}">Reset to Default</button>"#,
        mode.call("resetToDefault()")
    ));
    html.push_str(r#"</div></aside>"#);
    html
}

// ── Document ───────────────────────────────────────────────────────

/// Everything inside `<body>`.
pub fn body(state: &LoveState, mode: Mode, particles_html: &str) -> String {
    let derived = Derived::from_state(state);
    let mut html = String::with_capacity(8192);

    html.push_str(&format!(
        r#"<div class="particles" id="{}" aria-hidden="true">{}</div>"#,
        ids::PARTICLES,
        particles_html
    ));

    html.push_str(&format!(r#"<nav class="navbar" id="{}">"#, ids::NAVBAR));
    html.push_str(&format!(
        r#"<div class="logo" id="{}">{}</div>"#,
        ids::LOGO_TEXT,
        escape(&derived.initials)
    ));
    html.push_str(concat!(
        r##"<ul class="nav-links"><li><a href="#countdown">Countdown</a></li>"##,
        r##"<li><a href="#stories">Our Story</a></li><li><a href="#footer">Forever</a></li></ul></nav>"##,
    ));

    html.push_str(r#"<header class="hero" id="hero">"#);
    html.push_str(&format!(
        r#"<div class="hero-badge" id="{}">{}</div>"#,
        ids::HERO_BADGE,
        escape(&derived.hero_badge)
    ));
    html.push_str(&format!(
        r#"<h1 class="hero-title" id="{}">{}</h1>"#,
        ids::HERO_TITLE,
        escape(&derived.couple)
    ));
    html.push_str(&format!(
        r#"<p class="hero-subtitle" id="{}">{}</p>"#,
        ids::HERO_SUBTITLE_TEXT,
        escape(&state.hero_subtitle)
    ));
    html.push_str(r#"</header>"#);

    html.push_str(r#"<section class="countdown-section" id="countdown">"#);
    html.push_str(r#"<h2 class="section-title">Until Our Next Anniversary</h2><div class="countdown">"#);
    for (id, label) in [
        ("days", "Days"),
        ("hours", "Hours"),
        ("minutes", "Minutes"),
        ("seconds", "Seconds"),
    ] {
        html.push_str(&format!(
            r#"<div class="countdown-item"><span class="countdown-number" id="{}">00</span><span class="countdown-label">{}</span></div>"#,
            id, label
        ));
    }
    html.push_str(r#"</div></section>"#);

    html.push_str(r#"<section class="stories-section" id="stories">"#);
    html.push_str(r#"<h2 class="section-title">Our Moments</h2><div class="stories-container">"#);
    html.push_str(&format!(
        r#"<button class="scroll-btn scroll-left" onclick="{}" aria-label="Scroll left">&#8249;</button>"#,
        mode.call("scrollStories(-1)")
    ));
    html.push_str(&format!(
        r#"<div class="stories-scroll" id="{}" role="list">{}</div>"#,
        ids::STORIES_SCROLL,
        story_strip(&state.stories, mode)
    ));
    html.push_str(&format!(
        r#"<button class="scroll-btn scroll-right" onclick="{}" aria-label="Scroll right">&#8250;</button>"#,
        mode.call("scrollStories(1)")
    ));
    html.push_str(r#"</div></section>"#);

    html.push_str(r#"<footer class="footer" id="footer">"#);
    html.push_str(&format!(
        r#"<p class="footer-quote" id="{}">{}</p>"#,
        ids::FOOTER_QUOTE,
        escape(&state.love_quote)
    ));
    html.push_str(&format!(
        r#"<p class="footer-names" id="{}">{}</p>"#,
        ids::FOOTER_NAMES,
        escape(&derived.footer_names)
    ));
    html.push_str(r#"</footer>"#);

    html.push_str(&format!(
        r#"<div class="story-modal" id="{}" role="dialog" aria-modal="true" onclick="if (event.target === this) {}">"#,
        ids::STORY_MODAL,
        mode.call("closeStoryModal()")
    ));
    html.push_str(&format!(
        r#"<div class="story-modal-content"><button class="story-modal-close" onclick="{}" aria-label="Close">&times;</button>"#,
        mode.call("closeStoryModal()")
    ));
    html.push_str(&format!(
        r#"<img class="story-modal-image" id="{}" src="" alt="">"#,
        ids::STORY_MODAL_IMAGE
    ));
    html.push_str(&format!(
        r#"<h3 class="story-modal-title" id="{}"></h3><p class="story-modal-date" id="{}"></p><p class="story-modal-description" id="{}"></p>"#,
        ids::STORY_MODAL_TITLE,
        ids::STORY_MODAL_DATE,
        ids::STORY_MODAL_DESCRIPTION
    ));
    html.push_str(r#"</div></div>"#);

    if mode.editable() {
        html.push_str(&format!(
            r#"<button class="admin-toggle" onclick="{}" aria-label="Customize">&#9881;</button>"#,
            mode.call("toggleAdmin()")
        ));
        html.push_str(&admin_panel(state, mode));
        html.push_str(r#"<div class="watermark">Preview &middot; work in progress</div>"#);
    }

    html
}

/// A complete standalone document.
pub fn document(state: &LoveState, mode: Mode, particles_html: &str, script: &str) -> String {
    let mut html = String::with_capacity(16_384 + script.len());
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(r#"<html lang="en"><head><meta charset="UTF-8">"#);
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
    html.push_str(&format!(
        "<title>{} \u{2014} Our Love Story</title>",
        escape(&state.couple())
    ));
    html.push_str("<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style></head>");
    html.push_str(&format!(r#"<body data-theme="{}">"#, escape(&state.theme)));
    html.push_str(&body(state, mode, particles_html));
    if !script.is_empty() {
        html.push_str("<script>");
        html.push_str(script);
        html.push_str("</script>");
    }
    html.push_str("</body></html>");
    html
}
