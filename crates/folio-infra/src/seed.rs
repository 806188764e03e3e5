//! JSON seed files - a list of posts to preload into storage.
//!
//! ```json
//! [
//!   { "title": "Hello", "body": "# Hi", "published_at": "2024-05-01T09:00:00Z" },
//!   { "title": "Draft", "body": "wip" }
//! ]
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use folio_core::domain::Post;

/// Seed loading errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SeedPost {
    id: Option<Uuid>,
    title: String,
    #[serde(default)]
    body: String,
    published_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl SeedPost {
    /// Stable id for entries without one, so re-importing upserts instead of duplicating.
    fn derived_id(&self) -> Uuid {
        let published = self
            .published_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default();
        let name = format!("folio:seed:{}:{}", self.title, published);
        Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes())
    }

    fn into_post(self, now: DateTime<Utc>) -> Post {
        let id = self.id.unwrap_or_else(|| self.derived_id());
        let created_at = self.created_at.or(self.published_at).unwrap_or(now);
        Post {
            id,
            title: self.title,
            body: self.body,
            published_at: self.published_at,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

/// Parse seed JSON. Missing timestamps fall back to `published_at`, then `now`.
pub fn parse_posts(json: &str, now: DateTime<Utc>) -> Result<Vec<Post>, SeedError> {
    let seeds: Vec<SeedPost> = serde_json::from_str(json)?;
    Ok(seeds.into_iter().map(|s| s.into_post(now)).collect())
}

/// Read and parse a seed file.
pub async fn load_posts(path: &Path, now: DateTime<Utc>) -> Result<Vec<Post>, SeedError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let posts = parse_posts(&json, now)?;
    tracing::info!(path = %path.display(), count = posts.len(), "Loaded seed posts");
    Ok(posts)
}
