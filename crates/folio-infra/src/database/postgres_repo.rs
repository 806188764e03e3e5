//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use folio_core::domain::{Page, PageRequest, Post};
use folio_core::error::RepoError;
use folio_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Postgres `OFFSET` is a signed bigint.
const MAX_OFFSET: u64 = i64::MAX as u64;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(
        &self,
        request: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<Post>, RepoError> {
        if request.offset() > MAX_OFFSET {
            return Ok(Page::empty(request));
        }

        tracing::debug!(
            page = request.page(),
            page_size = request.page_size(),
            "Listing published posts"
        );

        let now: DateTimeWithTimeZone = now.into();
        let rows = PostEntity::find()
            .filter(post::Column::PublishedAt.is_not_null())
            .filter(post::Column::PublishedAt.lte(now))
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::Id)
            .offset(request.offset())
            .limit(request.fetch_limit().min(MAX_OFFSET))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Page::from_overfetch(
            rows.into_iter().map(Into::into).collect(),
            request,
        ))
    }
}

impl PostgresPostRepository {
    /// Insert posts, overwriting any existing row with the same id.
    ///
    /// Used to import a seed file into an empty database.
    pub async fn upsert_many(&self, posts: Vec<Post>) -> Result<u64, RepoError> {
        if posts.is_empty() {
            return Ok(0);
        }
        let count = posts.len() as u64;
        let models: Vec<post::ActiveModel> = posts.into_iter().map(Into::into).collect();

        PostEntity::insert_many(models)
            .on_conflict(
                OnConflict::column(post::Column::Id)
                    .update_columns([
                        post::Column::Title,
                        post::Column::Body,
                        post::Column::PublishedAt,
                        post::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::info!(count, "Imported posts");
        Ok(count)
    }
}
