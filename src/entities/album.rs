//! Album catalogue

use crate::core::aggregate::{
    breakdown, count, count_by, sum, trend, AggregateSnapshot, TrendWindow,
};
use crate::core::predicate::Tab;
use crate::core::schema::FieldRule;
use crate::entities::MusicGenre;
use chrono::NaiveDate;

categorical_enum! {
    pub enum AlbumStatus {
        #[default]
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

define_record!(
    Album, AlbumPatch, "album",
    id: i64,
    {
        title: String,
        artist: String,
        genre: MusicGenre,
        status: AlbumStatus,
        track_count: i64,
        duration_minutes: i64,
        release_date: NaiveDate,
        streams: i64,
    },
    searchable: ["title", "artist"],
    categorical: ["genre", "status"],
    required: ["title", "artist", "genre"],
    date_field: "release_date",
    rules: [FieldRule::new("title").max_length(120)],
    tabs: album_tabs,
);

fn album_tabs() -> Vec<Tab<Album>> {
    vec![
        Tab::all(),
        Tab::new("published", "Published", |a: &Album| a.status == AlbumStatus::Published),
        Tab::new("drafts", "Drafts", |a: &Album| a.status == AlbumStatus::Draft),
    ]
}

/// Numbers of the albums dashboard
pub fn summary(albums: &[Album], today: NaiveDate) -> AggregateSnapshot {
    let released = |a: &Album| (a.status == AlbumStatus::Published).then_some(a.release_date);

    AggregateSnapshot::builder("album")
        .count("total", albums.len())
        .count("published", count(albums, |a| a.status == AlbumStatus::Published))
        .count("drafts", count(albums, |a| a.status == AlbumStatus::Draft))
        .total("streams", sum(albums, |a| a.streams as f64))
        .total("tracks", sum(albums, |a| a.track_count as f64))
        .breakdown("by_genre", count_by(albums, |a| a.genre))
        .breakdown("streams_by_genre", breakdown(albums, |a| a.genre, |a| a.streams as f64))
        .trend("releases", trend(albums, released, |_| 1.0, TrendWindow::last_12_months(), today))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;
    use chrono::Utc;

    #[test]
    fn test_summary_counts_only_published_releases() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let make = |id: i64, status: AlbumStatus| {
            let draft = AlbumPatch::default()
                .title(format!("Album {id}"))
                .artist("Various")
                .genre(MusicGenre::Electronic)
                .status(status)
                .streams(250)
                .release_date(today);
            Album::from_draft(id, draft, Utc::now())
        };
        let albums = vec![make(1, AlbumStatus::Published), make(2, AlbumStatus::Draft)];
        let snapshot = summary(&albums, today);

        assert_eq!(snapshot.count("drafts"), Some(1));
        assert_eq!(snapshot.total("streams"), Some(500.0));
        assert_eq!(snapshot.trend("releases").unwrap()[11].value, 1.0);
        assert_eq!(snapshot.breakdown("by_genre").unwrap()[0].percentage, 100);
    }

    #[test]
    fn test_schema() {
        let schema = Album::schema();
        assert_eq!(schema.entity_type, "album");
        assert_eq!(schema.required, vec!["title", "artist", "genre"]);
        assert_eq!(schema.date_field.as_deref(), Some("release_date"));
    }
}
