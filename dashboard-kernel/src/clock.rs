//! Horloge murale du dashboard.
//!
//! Les timestamps exposés sont au format `HH:MM:SS`, sans date : une série
//! qui traverse minuit repart à `00:00:00`.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub const WALL_CLOCK: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

pub fn wall_clock(at: OffsetDateTime) -> String {
    at.format(WALL_CLOCK).unwrap_or_default()
}

/// Source de "maintenant" avec un décalage horaire fixé au démarrage
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Décalage explicite (minutes) sinon détection locale, UTC en dernier recours.
    pub fn from_config(utc_offset_minutes: Option<i16>) -> Self {
        let offset = match utc_offset_minutes {
            Some(minutes) => UtcOffset::from_whole_seconds(i32::from(minutes) * 60).unwrap_or_else(|e| {
                tracing::warn!(minutes, error = %e, "invalid utc offset, using UTC");
                UtcOffset::UTC
            }),
            None => UtcOffset::current_local_offset().unwrap_or_else(|_| {
                tracing::debug!("local offset indeterminate, using UTC");
                UtcOffset::UTC
            }),
        };
        Self::new(offset)
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Secondes depuis minuit d'un timestamp `HH:MM:SS` (helper de tests)
#[cfg(test)]
pub fn seconds_of_day(ts: &str) -> i64 {
    let t = time::Time::parse(ts, WALL_CLOCK).unwrap_or_else(|e| panic!("bad timestamp {ts}: {e}"));
    i64::from(t.hour()) * 3600 + i64::from(t.minute()) * 60 + i64::from(t.second())
}
