//! Integration tests for InMemoryRepository using the repository test harness.
//!
//! This file invokes `repository_tests!` to validate that InMemoryRepository
//! fully conforms to the Repository<R> contract.

#![cfg(feature = "in-memory")]

#[macro_use]
mod repository_harness;

use backstage::core::clock::Clock;
use backstage::storage::InMemoryRepository;
use repository_harness::*;

repository_tests!(
    InMemoryRepository::<backstage::entities::Genre>::new().with_clock(Clock::fixed(noon()))
);

mod seeded {
    use super::*;
    use backstage::core::service::Repository;
    use backstage::entities::genre::{Genre, GenrePatch};
    use backstage::prelude::*;

    #[test]
    fn test_duplicate_seed_is_rejected() {
        let genre = Genre::from_draft(1, genre_draft("Jazz"), noon());
        let err = InMemoryRepository::from_records(vec![genre.clone(), genre]).unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
    }

    #[test]
    fn test_blocking_use_from_sync_code() {
        let seed = vec![
            Genre::from_draft(5, genre_draft("Jazz"), noon()),
            Genre::from_draft(8, genre_draft("Soul"), noon()),
        ];
        let repo = InMemoryRepository::from_records(seed).unwrap();

        let created = tokio_test::block_on(repo.create(genre_draft("Funk"))).unwrap();
        assert_eq!(created.id, 9);
        let listed = tokio_test::block_on(repo.list()).unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[test]
    fn test_schema_override_applies_to_mutations() {
        let schema = Genre::schema().with_rule(FieldRule::new("description").required());
        let repo = InMemoryRepository::<Genre>::new().with_schema(schema);

        let err = tokio_test::block_on(repo.create(GenrePatch::default().name("Jazz"))).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
