//! Artist profiles and their verification workflow

use crate::core::aggregate::{breakdown, count, count_by, rate, sum, AggregateSnapshot};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;
use crate::entities::MusicGenre;
use chrono::NaiveDate;

categorical_enum! {
    /// Verification state of an artist profile
    pub enum ArtistStatus {
        #[default]
        Pending => "pending",
        Verified => "verified",
        Rejected => "rejected",
    }
}

define_record!(
    Artist, ArtistPatch, "artist",
    id: i64,
    {
        name: String,
        country: String,
        genre: MusicGenre,
        status: ArtistStatus,
        monthly_listeners: i64,
        followers: i64,
        joined_on: NaiveDate,
    },
    searchable: ["name", "country"],
    categorical: ["genre", "status"],
    required: ["name", "genre"],
    date_field: "joined_on",
    rules: [FieldRule::new("name").max_length(100)],
    tabs: artist_tabs,
);

fn artist_tabs() -> Vec<Tab<Artist>> {
    vec![
        Tab::all(),
        Tab::new("pending", "Pending review", |a: &Artist| a.status == ArtistStatus::Pending),
        Tab::new("verified", "Verified", |a: &Artist| a.status == ArtistStatus::Verified),
    ]
}

/// Numbers of the artists dashboard
pub fn summary(artists: &[Artist]) -> AggregateSnapshot {
    let total = artists.len();
    let verified = count(artists, |a| a.status == ArtistStatus::Verified);

    AggregateSnapshot::builder("artist")
        .count("total", total)
        .count("verified", verified)
        .count("pending", count(artists, |a| a.status == ArtistStatus::Pending))
        .total("monthly_listeners", sum(artists, |a| a.monthly_listeners as f64))
        .total("followers", sum(artists, |a| a.followers as f64))
        .breakdown("by_genre", count_by(artists, |a| a.genre))
        .breakdown(
            "listeners_by_genre",
            breakdown(artists, |a| a.genre, |a| a.monthly_listeners as f64),
        )
        .rate("verified_rate", rate(verified as f64, total as f64))
        .build()
}
