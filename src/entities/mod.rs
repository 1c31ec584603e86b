//! Music-domain records managed by the console
//!
//! Every screen of the console owns one of these record types. They are
//! declared with [`define_record!`](crate::define_record) and carry their
//! own tabs and dashboard summary.

#[macro_use]
pub mod macros;

pub mod album;
pub mod artist;
pub mod genre;
pub mod playlist;
pub mod report;
pub mod track;
pub mod transaction;
pub mod user;

pub use album::{Album, AlbumPatch, AlbumStatus};
pub use artist::{Artist, ArtistPatch, ArtistStatus};
pub use genre::{Genre, GenrePatch, GenreStatus};
pub use playlist::{Playlist, PlaylistPatch, Visibility};
pub use report::{Priority, Report, ReportKind, ReportPatch, ReportStatus};
pub use track::{Track, TrackPatch, TrackStatus};
pub use transaction::{PaymentMethod, Transaction, TransactionPatch, TransactionStatus};
pub use user::{User, UserPatch, UserRole, UserStatus};

categorical_enum! {
    /// Genre of artists, albums and tracks
    pub enum MusicGenre {
        #[default]
        Pop => "Pop",
        Rock => "Rock",
        HipHop => "Hip-Hop",
        Jazz => "Jazz",
        Electronic => "Electronic",
        Classical => "Classical",
        Soul => "Soul",
        Country => "Country",
        Latin => "Latin",
    }
}

categorical_enum! {
    /// Subscription plan of a listener
    pub enum Plan {
        #[default]
        Free => "free",
        Premium => "premium",
        Family => "family",
        Student => "student",
    }
}

impl Plan {
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }
}
