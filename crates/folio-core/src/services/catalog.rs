use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post};
use crate::error::DomainError;
use crate::ports::{BaseRepository, PostRepository};

/// Public, read-only view over the post collection.
///
/// Only published posts ever leave this service.
#[derive(Clone)]
pub struct PostCatalog {
    posts: Arc<dyn PostRepository>,
}

impl PostCatalog {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Page `page` (1-indexed) of posts published at `now`, newest first.
    pub async fn list_published(
        &self,
        page_size: u64,
        page: u64,
        now: DateTime<Utc>,
    ) -> Result<Page<Post>, DomainError> {
        let request = PageRequest::new(page_size, page)?;
        Ok(self.posts.list_published(request, now).await?)
    }

    /// A single post, hidden unless it is published at `now`.
    pub async fn find_published(&self, id: Uuid, now: DateTime<Utc>) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .filter(|post| post.is_published_at(now))
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;
    use crate::error::RepoError;

    /// Repository double that records calls and returns a canned outcome.
    struct StubRepository {
        post: Option<Post>,
        offline: bool,
        calls: AtomicUsize,
    }

    impl StubRepository {
        fn with_post(post: Option<Post>) -> Self {
            Self {
                post,
                offline: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn offline() -> Self {
            Self {
                post: None,
                offline: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for StubRepository {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(RepoError::Connection("connection refused".into()));
            }
            Ok(self.post.clone())
        }
    }

    #[async_trait]
    impl PostRepository for StubRepository {
        async fn list_published(
            &self,
            request: PageRequest,
            _now: DateTime<Utc>,
        ) -> Result<Page<Post>, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(RepoError::Connection("connection refused".into()));
            }
            Ok(Page::empty(request))
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_zero_page_size_never_reaches_storage() {
        let repo = Arc::new(StubRepository::with_post(None));
        let catalog = PostCatalog::new(repo.clone());

        let err = catalog.list_published(0, 1, now()).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_is_storage_unavailable() {
        let catalog = PostCatalog::new(Arc::new(StubRepository::offline()));

        let err = catalog.list_published(3, 1, now()).await.unwrap_err();

        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_find_published_hides_drafts_and_scheduled_posts() {
        let draft = Post::draft("Draft".into(), "".into(), now());
        let scheduled = draft.clone().published(now() + Duration::days(1));

        for post in [draft, scheduled] {
            let id = post.id;
            let catalog = PostCatalog::new(Arc::new(StubRepository::with_post(Some(post))));
            let err = catalog.find_published(id, now()).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { .. }));
        }
    }

    #[tokio::test]
    async fn test_find_published_returns_live_post() {
        let post = Post::draft("Live".into(), "".into(), now()).published(now());
        let catalog = PostCatalog::new(Arc::new(StubRepository::with_post(Some(post.clone()))));

        let found = catalog.find_published(post.id, now()).await.unwrap();

        assert_eq!(found, post);
    }
}
