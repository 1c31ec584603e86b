//! Genre taxonomy shown in browse screens

use crate::core::aggregate::{breakdown, count, sum, AggregateSnapshot};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;

categorical_enum! {
    pub enum GenreStatus {
        #[default]
        Active => "active",
        Hidden => "hidden",
    }
}

define_record!(
    Genre, GenrePatch, "genre",
    id: i64,
    {
        name: String,
        description: String,
        status: GenreStatus,
        artist_count: i64,
        track_count: i64,
    },
    searchable: ["name", "description"],
    categorical: ["status"],
    required: ["name"],
    rules: [FieldRule::new("name").max_length(40)],
    tabs: genre_tabs,
);

fn genre_tabs() -> Vec<Tab<Genre>> {
    vec![
        Tab::all(),
        Tab::new("active", "Active", |g: &Genre| g.status == GenreStatus::Active),
    ]
}

/// Numbers of the genres dashboard
pub fn summary(genres: &[Genre]) -> AggregateSnapshot {
    AggregateSnapshot::builder("genre")
        .count("total", genres.len())
        .count("active", count(genres, |g| g.status == GenreStatus::Active))
        .total("tracks", sum(genres, |g| g.track_count as f64))
        .breakdown("tracks_by_genre", breakdown(genres, |g| g.name.clone(), |g| g.track_count as f64))
        .build()
}
