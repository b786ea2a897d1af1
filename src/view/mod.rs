//! Document seam. Everything the controllers and the renderer do to the page
//! goes through `View`, so the browser adapter (`browser::DomView`) and the
//! test recorder see the exact same calls.

pub mod behaviors;
pub mod page;
pub mod render;

use crate::error::AppError;

/// Element ids shared by the templates, the renderer and the DOM adapter.
pub mod ids {
    pub const NAVBAR: &str = "navbar";
    pub const PARTICLES: &str = "particles";
    pub const LOGO_TEXT: &str = "logoText";
    pub const HERO_BADGE: &str = "heroBadge";
    pub const HERO_TITLE: &str = "heroTitle";
    pub const HERO_SUBTITLE_TEXT: &str = "heroSubtitleText";
    pub const FOOTER_QUOTE: &str = "footerQuote";
    pub const FOOTER_NAMES: &str = "footerNames";
    pub const STORIES_SCROLL: &str = "storiesScroll";
    pub const STORY_MODAL: &str = "storyModal";
    pub const STORY_MODAL_IMAGE: &str = "storyModalImage";
    pub const STORY_MODAL_TITLE: &str = "storyModalTitle";
    pub const STORY_MODAL_DATE: &str = "storyModalDate";
    pub const STORY_MODAL_DESCRIPTION: &str = "storyModalDescription";
    pub const ADMIN_PANEL: &str = "adminPanel";
    pub const ADMIN_STORY_SECTION: &str = "adminStorySection";

    // Admin form inputs
    pub const PARTNER1: &str = "partner1";
    pub const PARTNER2: &str = "partner2";
    pub const START_DATE: &str = "startDate";
    pub const ANNIVERSARY_DATE: &str = "anniversaryDate";
    pub const HERO_SUBTITLE: &str = "heroSubtitle";
    pub const LOVE_QUOTE: &str = "loveQuote";
    pub const STORY_IMAGE_URL: &str = "storyImageURL";
    pub const STORY_IMAGE_UPLOAD: &str = "storyImageUpload";
    pub const STORY_TITLE: &str = "storyTitle";
    pub const STORY_DATE: &str = "storyDate";
    pub const STORY_DESCRIPTION: &str = "storyDescription";

    /// Inputs cleared after a story is added.
    pub const STORY_FORM: &[&str] = &[
        STORY_IMAGE_URL,
        STORY_IMAGE_UPLOAD,
        STORY_TITLE,
        STORY_DATE,
        STORY_DESCRIPTION,
    ];
}

/// Operations on the live document.
pub trait View {
    fn set_text(&mut self, id: &str, text: &str);
    /// Write a form control's value.
    fn set_value(&mut self, id: &str, value: &str);
    /// Replace an element's children with pre-rendered markup.
    fn set_html(&mut self, id: &str, html: &str);
    fn set_image(&mut self, id: &str, src: &str, alt: &str);
    fn set_class(&mut self, id: &str, class: &str, on: bool);
    fn toggle_class(&mut self, id: &str, class: &str);
    /// Reflect the theme on the document body.
    fn set_theme(&mut self, theme: &str);
    /// Mark exactly one theme selector button active.
    fn mark_active_theme(&mut self, theme: &str);
    fn scroll_by(&mut self, id: &str, dx: i32);
    /// Scroll `container_id` so `child_id` is at its top.
    fn scroll_to_child(&mut self, container_id: &str, child_id: &str);
    fn notify(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
    fn reload(&mut self);
    /// Current page URL.
    fn location(&self) -> String;
    fn download(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), AppError>;
}
