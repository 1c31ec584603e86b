//! Core module containing the record model and the engines built on top of it

pub mod aggregate;
pub mod clock;
pub mod collection;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod mutation;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod service;
pub mod validation;
pub mod view;

pub use aggregate::{AggregateSnapshot, Growth, Share, TrendPoint, TrendWindow};
pub use clock::Clock;
pub use collection::Collection;
pub use entity::{Identity, Patch, Record};
pub use error::{ConsoleError, ConsoleResult, ErrorResponse};
pub use field::{FieldFormat, FieldValue};
pub use filter::{FilterComposer, FilterState, SortDirection, SortSpec};
pub use predicate::{CategoryFilter, DateRange, NumericRange, Tab};
pub use query::{Page, PageIndexing, PaginationMeta, PaginationState};
pub use schema::{EntitySchema, FieldRule};
pub use service::Repository;
pub use view::ListView;
