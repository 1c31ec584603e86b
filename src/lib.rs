//! # Backstage
//!
//! Query, pagination, mutation and aggregation engine behind the admin
//! console of a music-streaming service.
//!
//! ## Features
//!
//! - **Record model**: users, artists, albums, tracks, playlists, genres,
//!   reports and transactions declared through one macro
//! - **Filtering**: free-text search, categorical filters, tabs, relative
//!   date ranges and numeric ranges, ANDed together
//! - **Pagination**: clamped page index, 0- or 1-based
//! - **Mutations**: validated create/update/delete returning new collections
//! - **Aggregation**: totals, breakdowns with whole percentages that sum to
//!   100, trend series, growth and rates
//! - **Configuration**: per-entity overrides loaded from YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use backstage::prelude::*;
//! use backstage::entities::MusicGenre;
//! use backstage::entities::album::{Album, AlbumPatch, AlbumStatus};
//!
//! let mut view: ListView<Album> = ListView::new(Album::schema(), Collection::new());
//! view.create(
//!     AlbumPatch::default()
//!         .title("Blue Hours")
//!         .artist("Nina Vale")
//!         .genre(MusicGenre::Jazz)
//!         .status(AlbumStatus::Published),
//! )
//! .unwrap();
//!
//! view.set_category("status", "published");
//! let page = view.visible();
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.meta.total, 1);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Record model ===
    pub use crate::core::{
        collection::Collection,
        entity::{Identity, Patch, Record},
        field::{FieldFormat, FieldValue},
        schema::{EntitySchema, FieldRule},
    };

    // === Query engine ===
    pub use crate::core::{
        clock::Clock,
        filter::{FilterComposer, FilterState, SortDirection, SortSpec, apply_filters},
        predicate::{CategoryFilter, DateRange, NumericRange, Tab},
        query::{Page, PageIndexing, PaginationMeta, PaginationState, paginate, total_pages},
        view::ListView,
    };

    // === Mutations ===
    pub use crate::core::mutation::{self, Created};

    // === Aggregation ===
    pub use crate::core::aggregate::{
        AggregateSnapshot, Granularity, Growth, Share, TrendPoint, TrendWindow, breakdown, count,
        count_by, growth, percentages, period_totals, rate, sum, sum_field, trend,
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, ConsoleError, ConsoleResult, EntityError, ErrorResponse,
        FieldValidationError, StorageError, ValidationError,
    };

    // === Services ===
    pub use crate::core::service::Repository;

    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRepository;

    // === Configuration ===
    pub use crate::config::{ConsoleConfig, EntityOverride, ListDefaults};

    // === Macros ===
    pub use crate::{categorical_enum, define_record};

    // === Re-exports ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use uuid::Uuid;
}
