use crate::month::MusicMonth;
use chrono::{DateTime, Datelike, Duration, Months, Utc};

/// The range of instants that counts as "this month" when looking for the
/// active `MusicMonth`.
///
/// `start` is pushed two days before the first of the month so that a month
/// planned to start on the 1st is found even when its start time is
/// slightly off. `end` is the last day of the month. Both keep the time of
/// day of the instant the window was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Where a found `MusicMonth` is relative to a `MonthWindow`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStatus {
    Current,
    Upcoming,
}

/// The lookups used to find a `MusicMonth` by its start time.
/// Every variant resolves to at most one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthQuery {
    /// Earliest month starting after `after`
    StartingAfter { after: DateTime<Utc> },
    /// Earliest month starting strictly between `after` and `before`
    StartingBetween {
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    },
    /// Latest month starting before `before`
    StartedBefore { before: DateTime<Utc> },
}

impl MonthWindow {
    pub fn containing(now: DateTime<Utc>) -> Self {
        let start = now - Duration::days(now.day() as i64 + 1);
        // with_day(1) is valid for every month
        let first_of_month = now.with_day(1).unwrap_or(now);
        let end = first_of_month
            .checked_add_months(Months::new(1))
            .map(|first_of_next| first_of_next - Duration::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }

    /// A month found by `upcoming_or_current` that starts after the window
    /// has ended is only upcoming
    pub fn status_of(&self, month: &MusicMonth) -> MonthStatus {
        if month.start_time > self.end {
            MonthStatus::Upcoming
        } else {
            MonthStatus::Current
        }
    }

    /// The active month, or else the next one planned
    pub fn upcoming_or_current(&self) -> MonthQuery {
        MonthQuery::StartingAfter { after: self.start }
    }

    /// The active month only
    pub fn strictly_current(&self) -> MonthQuery {
        MonthQuery::StartingBetween {
            after: self.start,
            before: self.end,
        }
    }
}

impl MonthQuery {
    /// The month that started most recently, which may be the current one
    pub fn most_recent(now: DateTime<Utc>) -> Self {
        Self::StartedBefore { before: now }
    }

    pub fn matches(&self, month: &MusicMonth) -> bool {
        let start = month.start_time;
        match *self {
            Self::StartingAfter { after } => start > after,
            Self::StartingBetween { after, before } => after < start && start < before,
            Self::StartedBefore { before } => start < before,
        }
    }

    /// Whether the earliest or the latest match wins
    pub fn ascending(&self) -> bool {
        !matches!(self, Self::StartedBefore { .. })
    }
}
