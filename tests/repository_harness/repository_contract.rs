//! Macro-generated test suite for `Repository<Genre>` contract validation.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, identity assigned
//! - `test_get_nonexistent`: unknown identity returns None
//! - `test_list_empty`: empty store lists nothing
//! - `test_list_keeps_creation_order`
//! - `test_update_existing`: only the patched field changes
//! - `test_update_nonexistent`: NotFound, store unchanged
//! - `test_empty_update_is_identity`
//! - `test_delete_existing` / `test_delete_nonexistent`
//!
//! ## Validation
//! - `test_create_rejects_blank_required_field`
//! - `test_update_rejects_blanked_required_field`
//!
//! ## Concurrency
//! - `test_concurrent_creates`: parallel creates from spawned tasks

/// Generate a full `Repository<Genre>` conformance test suite.
///
/// `$factory` must evaluate to an empty repository implementing
/// `Repository<Genre> + Clone + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use backstage::core::service::Repository;
            use backstage::core::error::{ConsoleError, EntityError, ValidationError};
            use backstage::entities::genre::{Genre, GenrePatch, GenreStatus};

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let repo = $factory;
                let created = repo.create(genre_draft("Jazz")).await.unwrap();
                assert_eq!(created.id, 1);
                assert_eq!(created.name, "Jazz");
                assert_eq!(created.created_at, created.updated_at);

                let fetched = repo.get(&created.id).await.unwrap();
                assert_eq!(fetched, Some(created));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                assert_eq!(repo.get(&404).await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_list_empty() {
                let repo = $factory;
                assert!(repo.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_keeps_creation_order() {
                let repo = $factory;
                for name in ["Jazz", "Soul", "Afrobeat", "Bossa Nova"] {
                    repo.create(genre_draft(name)).await.unwrap();
                }
                let names: Vec<String> = repo
                    .list()
                    .await
                    .unwrap()
                    .iter()
                    .map(|g: &Genre| g.name.clone())
                    .collect();
                assert_eq!(names, vec!["Jazz", "Soul", "Afrobeat", "Bossa Nova"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repo = $factory;
                let created = repo.create(genre_draft("Jazz")).await.unwrap();

                let updated = repo
                    .update(&created.id, GenrePatch::default().status(GenreStatus::Hidden))
                    .await
                    .unwrap();
                assert_eq!(updated.status, GenreStatus::Hidden);
                assert_eq!(updated.name, "Jazz");
                assert_eq!(updated.track_count, 10);
                assert_eq!(repo.get(&created.id).await.unwrap(), Some(updated));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let repo = $factory;
                repo.create(genre_draft("Jazz")).await.unwrap();
                let before = repo.list().await.unwrap();

                let err = repo
                    .update(&99, GenrePatch::default().name("Ghost"))
                    .await
                    .unwrap_err();
                assert!(matches!(err, ConsoleError::Entity(EntityError::NotFound { .. })));
                assert_eq!(repo.list().await.unwrap(), before);
            }

            #[tokio::test]
            async fn test_empty_update_is_identity() {
                let repo = $factory;
                let created = repo.create(genre_draft("Jazz")).await.unwrap();
                let unchanged = repo.update(&created.id, GenrePatch::default()).await.unwrap();
                assert_eq!(unchanged, created);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repo = $factory;
                let created = repo.create(genre_draft("Jazz")).await.unwrap();
                assert!(repo.delete(&created.id).await.unwrap());
                assert_eq!(repo.get(&created.id).await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let repo = $factory;
                repo.create(genre_draft("Jazz")).await.unwrap();
                assert!(!repo.delete(&42).await.unwrap());
                assert_eq!(repo.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_identity_continues_after_delete() {
                let repo = $factory;
                for name in ["Jazz", "Soul", "Funk"] {
                    repo.create(genre_draft(name)).await.unwrap();
                }
                repo.delete(&2).await.unwrap();
                let created = repo.create(genre_draft("Disco")).await.unwrap();
                assert_eq!(created.id, 4);
            }

            // ==================================================================
            // Validation
            // ==================================================================

            #[tokio::test]
            async fn test_create_rejects_blank_required_field() {
                let repo = $factory;
                let err = repo.create(genre_draft("   ")).await.unwrap_err();
                match err {
                    ConsoleError::Validation(e @ ValidationError::FieldErrors { .. }) => {
                        assert_eq!(e.field_names(), vec!["name"]);
                    }
                    other => panic!("expected a validation error, got {other:?}"),
                }
                assert!(repo.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_rejects_blanked_required_field() {
                let repo = $factory;
                let created = repo.create(genre_draft("Jazz")).await.unwrap();
                let err = repo
                    .update(&created.id, GenrePatch::default().name(""))
                    .await
                    .unwrap_err();
                assert_eq!(err.error_code(), "VALIDATION_ERROR");
                assert_eq!(repo.get(&created.id).await.unwrap(), Some(created));
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let repo = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let repo = repo.clone();
                    handles.push(tokio::spawn(async move {
                        repo.create(genre_draft(&format!("Genre {i}"))).await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                let collection = repo.list().await.unwrap();
                let mut ids: Vec<i64> = collection.ids().copied().collect();
                ids.sort_unstable();
                assert_eq!(ids, (1..=10).collect::<Vec<_>>());
            }
        }
    };
}
