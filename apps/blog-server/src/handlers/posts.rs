//! Public post endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use folio_core::domain::{Page, Post};
use folio_shared::ApiResponse;
use folio_shared::dto::{ListPostsQuery, PostPageResponse, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// The home listing: newest published posts, a fixed number per page.
///
/// GET /api/posts?page=N
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
    request_id: RequestId,
) -> AppResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let now = state.clock.now();

    let posts = state
        .catalog
        .list_published(state.posts_per_page, page, now)
        .await?;

    tracing::debug!(
        request_id = request_id.as_str(),
        page,
        returned = posts.items.len(),
        has_more = posts.has_more,
        "Listed published posts"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(posts)?)))
}

/// A single published post.
///
/// GET /api/posts/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .catalog
        .find_published(path.into_inner(), state.clock.now())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post)?)))
}

fn post_response(post: Post) -> AppResult<PostResponse> {
    // The catalog only hands out published posts.
    let published_at = post.published_at.ok_or_else(|| {
        AppError::Internal(format!("post {} listed without a publish date", post.id))
    })?;

    Ok(PostResponse {
        id: post.id,
        title: post.title,
        body: post.body,
        published_at,
        updated_at: post.updated_at,
    })
}

fn page_response(page: Page<Post>) -> AppResult<PostPageResponse> {
    let next_page = page.next_page();
    let previous_page = page.previous_page();

    Ok(PostPageResponse {
        posts: page
            .items
            .into_iter()
            .map(post_response)
            .collect::<AppResult<_>>()?,
        page: page.page,
        per_page: page.page_size,
        has_more: page.has_more,
        next_page,
        previous_page,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use chrono::{DateTime, Duration, Utc};
    use serde_json::Value;

    use folio_infra::{FixedClock, InMemoryPostRepository};

    use crate::handlers::configure_routes;
    use crate::observability::RequestIdMiddleware;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Five published posts (t1 newest), a draft and a scheduled post.
    fn posts() -> Vec<Post> {
        let mut posts: Vec<Post> = (1..=5)
            .map(|n| {
                Post::draft(format!("t{n}"), format!("body {n}"), now())
                    .published(now() - Duration::days(n))
            })
            .collect();
        posts.push(Post::draft("draft".into(), String::new(), now()));
        posts.push(
            Post::draft("scheduled".into(), String::new(), now())
                .published(now() + Duration::days(1)),
        );
        posts
    }

    fn state(posts: Vec<Post>) -> AppState {
        AppState::with_repository(
            Arc::new(InMemoryPostRepository::with_posts(posts)),
            Arc::new(FixedClock(now())),
            3,
        )
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    fn titles(body: &Value) -> Vec<String> {
        body["data"]["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_owned())
            .collect()
    }

    #[actix_web::test]
    async fn test_home_lists_first_page() {
        let (status, body) = get_json(state(posts()), "/api/posts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["t1", "t2", "t3"]);
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["per_page"], 3);
        assert_eq!(body["data"]["has_more"], true);
        assert_eq!(body["data"]["next_page"], 2);
        assert!(body["data"].get("previous_page").is_none());
    }

    #[actix_web::test]
    async fn test_second_page_is_last() {
        let (status, body) = get_json(state(posts()), "/api/posts?page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["t4", "t5"]);
        assert_eq!(body["data"]["has_more"], false);
        assert_eq!(body["data"]["previous_page"], 1);
    }

    #[actix_web::test]
    async fn test_page_past_the_end_is_empty() {
        let (status, body) = get_json(state(posts()), "/api/posts?page=99").await;

        assert_eq!(status, StatusCode::OK);
        assert!(titles(&body).is_empty());
        assert_eq!(body["data"]["has_more"], false);
    }

    #[actix_web::test]
    async fn test_page_zero_is_rejected() {
        let (status, body) = get_json(state(posts()), "/api/posts?page=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[actix_web::test]
    async fn test_non_numeric_page_is_problem_details() {
        let (status, body) = get_json(state(posts()), "/api/posts?page=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["title"], "Bad Request");
        assert_eq!(body["instance"], "/api/posts");
        assert!(body["request_id"].is_string());
    }

    #[actix_web::test]
    async fn test_problem_details_echo_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(state(posts())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/posts?page=0")
            .insert_header(("X-Request-ID", "req-42"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.headers().get("x-request-id").unwrap(), "req-42");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["request_id"], "req-42");
        assert_eq!(body["instance"], "/api/posts");
        assert_eq!(body["status"], 400);
    }

    #[actix_web::test]
    async fn test_show_published_post() {
        let posts = posts();
        let id = posts[0].id;

        let (status, body) = get_json(state(posts), &format!("/api/posts/{id}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "t1");
        assert_eq!(body["data"]["body"], "body 1");
    }

    #[actix_web::test]
    async fn test_unpublished_posts_are_not_found() {
        let posts = posts();
        let draft = posts[5].id;
        let scheduled = posts[6].id;

        for id in [draft, scheduled] {
            let (status, body) = get_json(state(posts.clone()), &format!("/api/posts/{id}")).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["status"], 404);
        }
    }

    #[actix_web::test]
    async fn test_health_reports_memory_storage() {
        let (status, body) = get_json(state(vec![]), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
        assert_eq!(body["environment"], "testing");
    }
}
