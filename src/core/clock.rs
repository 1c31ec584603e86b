//! Source of "now" for timestamps, date ranges and trend anchors

use chrono::{DateTime, NaiveDate, Utc};

/// Wall clock, or a frozen instant for reproducible views and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Clock::Fixed(at)
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Calendar date of [`now`](Self::now) in UTC
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
