//! In-memory post repository - used when no database is configured.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::domain::{Page, PageRequest, Post};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a `HashMap` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository pre-filled with `posts`.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            store: RwLock::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Add or replace a post. Authoring happens outside the public read path.
    pub async fn insert(&self, post: Post) {
        self.store.write().await.insert(post.id, post);
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(
        &self,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;

        let mut published: Vec<&Post> = store
            .values()
            .filter(|post| post.is_published_at(now))
            .collect();
        published.sort_by_key(|post| (Reverse(post.published_at), Reverse(post.id)));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.fetch_limit()).unwrap_or(usize::MAX);
        let rows = published
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page::from_overfetch(rows, request))
    }
}
