use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog article.
///
/// A post is published once `published_at` is set and no longer in the future.
/// The status is derived from the timestamp at read time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Markdown source.
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new unpublished draft.
    pub fn draft(title: String, body: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the publish timestamp. A future timestamp schedules the post.
    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    /// Whether the post is visible to the public at `now`.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_draft_is_not_published() {
        let post = Post::draft("Draft".into(), "body".into(), now());
        assert!(!post.is_published_at(now()));
    }

    #[test]
    fn test_past_and_present_timestamps_are_published() {
        let past = Post::draft("Old".into(), "".into(), now()).published(now() - Duration::days(3));
        let exact = Post::draft("Now".into(), "".into(), now()).published(now());
        assert!(past.is_published_at(now()));
        assert!(exact.is_published_at(now()));
    }

    #[test]
    fn test_scheduled_post_is_hidden_until_due() {
        let due = now() + Duration::hours(1);
        let post = Post::draft("Soon".into(), "".into(), now()).published(due);
        assert!(!post.is_published_at(now()));
        assert!(post.is_published_at(due));
    }
}
