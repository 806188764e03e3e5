use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post};
use crate::error::RepoError;

/// Generic read access shared by all repositories.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// List posts published at `now`, newest first.
    ///
    /// Ties on `published_at` are broken by descending id so repeated calls are stable.
    /// A page past the end is empty rather than an error.
    async fn list_published(
        &self,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<Post>, RepoError>;
}
