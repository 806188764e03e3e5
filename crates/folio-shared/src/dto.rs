//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string for the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    /// 1-indexed page number; the first page when absent.
    pub page: Option<u64>,
}

/// A published post as shown to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the post listing.
///
/// There is no total count: readers move forward while `has_more` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPageResponse {
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub per_page: u64,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_omits_previous_link() {
        let page = PostPageResponse {
            posts: vec![],
            page: 1,
            per_page: 3,
            has_more: true,
            next_page: Some(2),
            previous_page: None,
        };

        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["next_page"], 2);
        assert!(json.get("previous_page").is_none());
    }
}
