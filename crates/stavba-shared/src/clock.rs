//! Time source used for timestamps and "today" comparisons.
//!
//! Instants are kept in UTC; calendar-day questions are answered in the
//! local offset in effect at each instant, so a check-in at 23:30 local time
//! still belongs to that local day, also across a DST switch.

use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the local timezone in effect at `instant`.
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset;

    /// Calendar day of `instant` in the local timezone.
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset_at(instant)).date_naive()
    }

    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }

    fn is_today(&self, instant: DateTime<Utc>) -> bool {
        self.local_date(instant) == self.today()
    }

    /// Locale-formatted rendering of the current instant.
    fn locale_timestamp(&self) -> String {
        let now = self.now();
        now.with_timezone(&self.offset_at(now))
            .format(crate::constants::LOCALE_TIMESTAMP_FORMAT)
            .to_string()
    }
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        instant.with_timezone(&Local).offset().fix()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
    /// `(switch_at, offset)`: from `switch_at` on, `offset` applies.
    transition: Option<(DateTime<Utc>, FixedOffset)>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_offset(now, Utc.fix())
    }

    pub fn with_offset(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Mutex::new(now),
            offset,
            transition: None,
        }
    }

    /// Switch from the current offset to `after` at `switch_at`, like a DST
    /// change.
    pub fn with_transition(mut self, switch_at: DateTime<Utc>, after: FixedOffset) -> Self {
        self.transition = Some((switch_at, after));
        self
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self.transition {
            Some((switch_at, after)) if instant >= switch_at => after,
            _ => self.offset,
        }
    }
}
