//! Countdown engine — time remaining until the anniversary.
//!
//! Two logical states: **Counting** while the target is still ahead, and
//! **Expired** once it has passed. The arithmetic lives in `read`; the
//! repeating timer is abstracted behind `Ticker` so the single-handle rule
//! can be checked without a browser.

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Days / hours / minutes / seconds left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Breakdown {
    /// Split a non-negative distance in milliseconds.
    pub fn from_distance(distance_ms: i64) -> Self {
        Self {
            days: distance_ms.div_euclid(MS_PER_DAY),
            hours: distance_ms.rem_euclid(MS_PER_DAY) / MS_PER_HOUR,
            minutes: distance_ms.rem_euclid(MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: distance_ms.rem_euclid(MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Counting(Breakdown),
    Expired,
}

/// Compare `now_ms` against `target_ms`.
pub fn read(target_ms: i64, now_ms: i64) -> Reading {
    let distance = target_ms - now_ms;
    if distance < 0 {
        Reading::Expired
    } else {
        Reading::Counting(Breakdown::from_distance(distance))
    }
}

/// Text for the four display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Display {
    pub fn from_reading(reading: Reading, marker: &str) -> Self {
        match reading {
            Reading::Counting(b) => Self {
                days: format_days(b.days),
                hours: format!("{:02}", b.hours),
                minutes: format!("{:02}", b.minutes),
                seconds: format!("{:02}", b.seconds),
            },
            Reading::Expired => Self {
                days: marker.to_string(),
                hours: marker.to_string(),
                minutes: marker.to_string(),
                seconds: marker.to_string(),
            },
        }
    }

    /// `(element id, text)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("days", &self.days),
            ("hours", &self.hours),
            ("minutes", &self.minutes),
            ("seconds", &self.seconds),
        ]
    }
}

/// Plain below 1000, comma-grouped (`1,234`) from there on.
pub fn format_days(days: i64) -> String {
    if days < 1000 {
        return days.to_string();
    }
    let digits = days.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Timer ──────────────────────────────────────────────────────────

/// Source of repeating ticks. The handle is opaque; cancelling consumes it.
pub trait Ticker {
    type Handle;
    fn start(&mut self, period_ms: u32) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Owns at most one live timer handle.
pub struct CountdownEngine<T: Ticker> {
    ticker: T,
    handle: Option<T::Handle>,
    period_ms: u32,
}

impl<T: Ticker> CountdownEngine<T> {
    pub fn new(ticker: T, period_ms: u32) -> Self {
        Self {
            ticker,
            handle: None,
            period_ms,
        }
    }

    /// Cancel any running timer, then start a fresh one.
    pub fn restart(&mut self) {
        self.stop();
        self.handle = Some(self.ticker.start(self.period_ms));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.ticker.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }
}
