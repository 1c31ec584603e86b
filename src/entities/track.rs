//! Tracks and their moderation state

use crate::core::aggregate::{breakdown, count, rate, sum, AggregateSnapshot};
use crate::core::predicate::Tab;
use crate::entities::MusicGenre;
use chrono::NaiveDate;

categorical_enum! {
    pub enum TrackStatus {
        #[default]
        Active => "active",
        Flagged => "flagged",
        Removed => "removed",
    }
}

define_record!(
    Track, TrackPatch, "track",
    id: i64,
    {
        title: String,
        artist: String,
        album: String,
        genre: MusicGenre,
        status: TrackStatus,
        /// Carries an explicit-content advisory
        explicit: bool,
        duration_seconds: i64,
        plays: i64,
        release_date: NaiveDate,
    },
    searchable: ["title", "artist", "album"],
    categorical: ["genre", "status"],
    required: ["title", "artist"],
    date_field: "release_date",
    tabs: track_tabs,
);

fn track_tabs() -> Vec<Tab<Track>> {
    vec![
        Tab::all(),
        Tab::new("explicit", "Explicit", |t: &Track| t.explicit),
        Tab::new("flagged", "Flagged", |t: &Track| t.status == TrackStatus::Flagged),
    ]
}

/// Numbers of the tracks dashboard
pub fn summary(tracks: &[Track]) -> AggregateSnapshot {
    let total = tracks.len();
    let flagged = count(tracks, |t| t.status == TrackStatus::Flagged);
    let explicit = count(tracks, |t| t.explicit);

    AggregateSnapshot::builder("track")
        .count("total", total)
        .count("flagged", flagged)
        .count("explicit", explicit)
        .total("plays", sum(tracks, |t| t.plays as f64))
        .total("hours", sum(tracks, |t| t.duration_seconds as f64) / 3600.0)
        .breakdown("plays_by_genre", breakdown(tracks, |t| t.genre, |t| t.plays as f64))
        .rate("flagged_rate", rate(flagged as f64, total as f64))
        .rate("explicit_rate", rate(explicit as f64, total as f64))
        .build()
}
