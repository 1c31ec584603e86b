//! Editorial and user playlists

use crate::core::aggregate::{count, count_by, sum, AggregateSnapshot};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;

categorical_enum! {
    pub enum Visibility {
        #[default]
        Private => "private",
        Public => "public",
        Collaborative => "collaborative",
    }
}

define_record!(
    Playlist, PlaylistPatch, "playlist",
    id: i64,
    {
        name: String,
        owner: String,
        description: String,
        visibility: Visibility,
        /// Pinned on the home screen by editors
        featured: bool,
        track_count: i64,
        followers: i64,
    },
    searchable: ["name", "owner", "description"],
    categorical: ["visibility"],
    required: ["name", "owner"],
    date_field: "created_at",
    rules: [FieldRule::new("description").max_length(300)],
    tabs: playlist_tabs,
);

fn playlist_tabs() -> Vec<Tab<Playlist>> {
    vec![
        Tab::all(),
        Tab::new("public", "Public", |p: &Playlist| p.visibility == Visibility::Public),
        Tab::new("featured", "Featured", |p: &Playlist| p.featured),
    ]
}

/// Numbers of the playlists dashboard
pub fn summary(playlists: &[Playlist]) -> AggregateSnapshot {
    AggregateSnapshot::builder("playlist")
        .count("total", playlists.len())
        .count("featured", count(playlists, |p| p.featured))
        .total("followers", sum(playlists, |p| p.followers as f64))
        .total("tracks", sum(playlists, |p| p.track_count as f64))
        .breakdown("by_visibility", count_by(playlists, |p| p.visibility))
        .build()
}
