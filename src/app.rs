//! Application context.
//!
//! `App` owns the State, its snapshot store, the document view and the
//! countdown timer. Controllers receive it explicitly instead of reaching for
//! globals, which is what lets every controller run against a fabricated
//! store/view/ticker in tests. The browser build keeps one instance alive for
//! the page's lifetime (see `lib.rs`).

use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::countdown::{self, CountdownEngine, Display, Reading, Ticker};
use crate::model::dates;
use crate::model::state::{self, LoveState, Story};
use crate::model::store::{KeyValueStore, SnapshotStore};
use crate::view::{ids, render, View};

/// Shallow update of the scalar fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdates {
    pub partner1: Option<String>,
    pub partner2: Option<String>,
    pub start_date: Option<String>,
    pub anniversary_date: Option<String>,
    pub hero_subtitle: Option<String>,
    pub love_quote: Option<String>,
    pub theme: Option<String>,
}

impl FieldUpdates {
    fn apply(self, state: &mut LoveState) {
        fn merge(slot: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        merge(&mut state.partner1, self.partner1);
        merge(&mut state.partner2, self.partner2);
        merge(&mut state.start_date, self.start_date);
        merge(&mut state.anniversary_date, self.anniversary_date);
        merge(&mut state.hero_subtitle, self.hero_subtitle);
        merge(&mut state.love_quote, self.love_quote);
        merge(&mut state.theme, self.theme);
    }
}

pub struct App<S: KeyValueStore, V: View, T: Ticker> {
    config: AppConfig,
    state: LoveState,
    store: SnapshotStore<S>,
    view: V,
    countdown: CountdownEngine<T>,
}

impl<S: KeyValueStore, V: View, T: Ticker> App<S, V, T> {
    /// Build State from the persisted snapshot, or from the defaults when
    /// there is none (or it can't be read). Call once per page load.
    pub fn initialize(config: AppConfig, backend: S, view: V, ticker: T) -> Self {
        let store = SnapshotStore::new(backend, config.storage_key.clone());
        let state = match store.load() {
            Ok(Some(json)) => state::decode_snapshot(&json),
            Ok(None) => LoveState::default(),
            Err(e) => {
                log::warn!("snapshot unavailable, using defaults: {}", e);
                LoveState::default()
            }
        };
        let countdown = CountdownEngine::new(ticker, config.tick_period_ms);
        log::info!("love story loaded for {}", state.couple());
        Self {
            config,
            state,
            store,
            view,
            countdown,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &LoveState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &SnapshotStore<S> {
        &self.store
    }

    pub fn countdown(&self) -> &CountdownEngine<T> {
        &self.countdown
    }

    /// Write the full snapshot.
    pub fn persist(&self) -> Result<(), AppError> {
        let json = self.state.to_snapshot()?;
        self.store.save(&json)
    }

    /// Full render pass: project State, then replace the countdown timer.
    pub fn render(&mut self) {
        render::render(&mut self.state, &mut self.view);
        self.countdown.restart();
        log::debug!("rendered {} stories", self.state.stories.len());
    }

    /// Merge already-validated field updates, persist, re-render.
    pub fn mutate(&mut self, updates: FieldUpdates) -> Result<(), AppError> {
        let previous = self.state.clone();
        updates.apply(&mut self.state);
        self.commit(previous)
    }

    /// Append an already-validated story, persist, re-render.
    pub fn add_story(&mut self, story: Story) -> Result<(), AppError> {
        let previous = self.state.clone();
        self.state.stories.push(story);
        self.commit(previous)
    }

    /// Persist and render, or put `previous` back if the save fails so
    /// memory never runs ahead of the stored snapshot.
    fn commit(&mut self, previous: LoveState) -> Result<(), AppError> {
        if let Err(e) = self.persist() {
            log::warn!("save failed, change rolled back: {}", e);
            self.state = previous;
            return Err(e);
        }
        self.render();
        Ok(())
    }

    /// Move `anniversaryDate` to the same month/day next year (relative to
    /// `now_ms`) and persist.
    pub fn advance_anniversary(&mut self, now_ms: i64) -> Result<(), AppError> {
        let current = dates::parse_iso(&self.state.anniversary_date)
            .or_else(|| dates::parse_iso(state::DEFAULT_ANNIVERSARY_DATE))
            .ok_or_else(|| AppError::Validation("anniversary date unreadable".into()))?;
        let next = dates::with_year(current, dates::year_at(now_ms) + 1);
        self.state.anniversary_date = dates::format_iso(next);
        log::info!("anniversary passed, next one is {}", self.state.anniversary_date);
        self.persist()
    }

    /// One countdown tick. On expiry the markers are shown, the date rolls
    /// forward and the timer stops until the next render.
    pub fn countdown_tick(&mut self, now_ms: i64) -> Reading {
        let reading = match dates::parse_iso(&self.state.anniversary_date) {
            Some(date) => countdown::read(dates::midnight_utc_millis(date), now_ms),
            None => Reading::Expired,
        };

        let display = Display::from_reading(reading, &self.config.celebration_marker);
        for (id, text) in display.fields() {
            self.view.set_text(id, text);
        }

        if reading == Reading::Expired {
            match self.advance_anniversary(now_ms) {
                Ok(()) => self
                    .view
                    .set_value(ids::ANNIVERSARY_DATE, &self.state.anniversary_date),
                Err(e) => log::warn!("could not roll anniversary forward: {}", e),
            }
            self.countdown.stop();
        }
        reading
    }

    /// Remove the persisted snapshot. The next load starts from defaults.
    pub fn clear_snapshot(&self) -> Result<(), AppError> {
        self.store.clear()
    }
}
