//! Shared test harness for repository backends
//!
//! Provides genre drafts and a fixed clock, plus the `repository_tests!`
//! macro that checks any `Repository<Genre>` against the full contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//!
//! use repository_harness::*;
//! repository_tests!(InMemoryRepository::<Genre>::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_contract;

use backstage::entities::genre::{GenrePatch, GenreStatus};
use chrono::{DateTime, TimeZone, Utc};

pub fn genre_draft(name: &str) -> GenrePatch {
    GenrePatch::default()
        .name(name)
        .description(format!("{name} catalogue"))
        .status(GenreStatus::Active)
        .track_count(10)
}

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()
}
