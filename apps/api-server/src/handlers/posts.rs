//! Post endpoints: public submission and listing, moderator queue.

use actix_web::{HttpResponse, web};
use vigia_core::domain::{Post, Submission};
use vigia_core::pagination::{MODERATION_PAGE_LIMIT, PUBLIC_PAGE_LIMIT, Page, PageRequest};
use vigia_shared::dto::{
    ModerationListQuery, ModeratePostRequest, PaginatedResponse, PaginationMeta,
    PublicListQuery, SubmitPostRequest,
};

use crate::middleware::auth::Moderator;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn paginated(page: Page<Post>) -> PaginatedResponse<Post> {
    PaginatedResponse {
        pagination: PaginationMeta {
            page: page.page,
            limit: page.limit,
            total: page.total,
            pages: page.pages,
        },
        posts: page.items,
    }
}

/// Approved posts, newest first.
///
/// GET /api/posts?category=&page=&limit=
pub async fn list_public(
    state: web::Data<AppState>,
    query: web::Query<PublicListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = PageRequest::from_params(
        query.page.as_deref(),
        query.limit.as_deref(),
        PUBLIC_PAGE_LIMIT,
    );

    let posts = state
        .queries
        .list_public(query.category.as_deref(), page)
        .await?;

    Ok(HttpResponse::Ok().json(paginated(posts)))
}

/// Submit a new report. It enters the moderation queue as pending.
///
/// POST /api/posts
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<SubmitPostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let submission = Submission {
        title: body.title,
        content: body.content,
        category: body.category,
        link: body.link,
    };

    let post = state.submissions.submit(submission).await?;

    Ok(HttpResponse::Created().json(post))
}

/// Totals and per-category counts over approved posts.
///
/// GET /api/posts/stats/public
pub async fn public_stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.queries.public_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Posts of any status for the moderation queue.
///
/// GET /api/posts/moderation?status=&page=&limit=
pub async fn list_for_moderation(
    _moderator: Moderator,
    state: web::Data<AppState>,
    query: web::Query<ModerationListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = PageRequest::from_params(
        query.page.as_deref(),
        query.limit.as_deref(),
        MODERATION_PAGE_LIMIT,
    );

    let posts = state
        .moderation
        .list(query.status.as_deref(), page)
        .await?;

    Ok(HttpResponse::Ok().json(paginated(posts)))
}

/// Post counts per status.
///
/// GET /api/posts/moderation/stats
pub async fn moderation_stats(
    _moderator: Moderator,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let stats = state.moderation.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Approve or reject a post.
///
/// PUT /api/posts/{id}/moderate
pub async fn moderate(
    moderator: Moderator,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ModeratePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let body = body.into_inner();

    tracing::debug!(
        post_id = %post_id,
        action = %body.action,
        remote_addr = %moderator.remote_addr,
        "Moderation requested"
    );

    let post = state
        .moderation
        .moderate(&post_id, &body.action, body.notes.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use vigia_infra::{InMemoryPostRepository, SharedSecretValidator};

    use crate::handlers::configure_routes;
    use crate::middleware::origin::OriginPolicy;
    use crate::state::AppState;

    const SECRET: &str = "s3cret-moderator-key";

    fn state_with(secret: Option<&str>, origin_policy: OriginPolicy) -> AppState {
        AppState::with_repository(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(SharedSecretValidator::new(secret.map(String::from))),
            origin_policy,
            "memory",
        )
    }

    fn state() -> AppState {
        state_with(Some(SECRET), OriginPolicy::default())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn bearer(token: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    #[actix_rt::test]
    async fn test_submit_then_approve_then_list() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "X", "content": "Y", "category": "gobierno" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: Value = test::read_body_json(resp).await;
        assert_eq!(post["status"], "pending");
        let id = post["id"].as_str().unwrap().to_string();

        // Pending posts are not public yet.
        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"].as_array().unwrap().len(), 0);

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}/moderate"))
            .insert_header(bearer(SECRET))
            .set_json(json!({ "action": "approve" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let post: Value = test::read_body_json(resp).await;
        assert_eq!(post["status"], "approved");
        assert_eq!(post["moderatedBy"], "admin");
        assert!(post["moderationDate"].is_string());
        assert_eq!(post["moderationNotes"], "");

        let req = test::TestRequest::get()
            .uri("/api/posts?category=gobierno")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"][0]["id"], id.as_str());
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["pagination"]["limit"], 10);

        let req = test::TestRequest::get()
            .uri("/api/posts?category=salud")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"].as_array().unwrap().len(), 0);
    }

    #[actix_rt::test]
    async fn test_submit_ignores_client_status() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "X",
                "content": "Y",
                "status": "approved",
                "votes": 99
            }))
            .to_request();
        let post: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(post["status"], "pending");
        assert_eq!(post["votes"], 0);
        assert_eq!(post["category"], "general");
    }

    #[actix_rt::test]
    async fn test_submit_validation_errors() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "   ", "content": "Y" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_input");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_input");
    }

    #[actix_rt::test]
    async fn test_moderator_routes_require_credential() {
        let app = app!(state());

        for (auth, expected) in [
            (None, StatusCode::UNAUTHORIZED),
            (Some("Bearer wrong"), StatusCode::UNAUTHORIZED),
            (Some("Token s3cret-moderator-key"), StatusCode::UNAUTHORIZED),
            (Some("Bearer s3cret-moderator-key"), StatusCode::OK),
        ] {
            let mut req = test::TestRequest::get().uri("/api/posts/moderation/stats");
            if let Some(value) = auth {
                req = req.insert_header((header::AUTHORIZATION, value));
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), expected, "{auth:?}");
        }
    }

    #[actix_rt::test]
    async fn test_unconfigured_secret_fails_closed() {
        let app = app!(state_with(None, OriginPolicy::default()));

        for auth in [None, Some("Bearer anything"), Some("garbage"), Some("Bearer ")] {
            let mut req = test::TestRequest::get().uri("/api/posts/moderation/stats");
            if let Some(value) = auth {
                req = req.insert_header((header::AUTHORIZATION, value));
            }
            let resp = test::call_service(&app, req.to_request()).await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{auth:?}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], "server_misconfigured");
        }
    }

    #[actix_rt::test]
    async fn test_forwarded_host_does_not_satisfy_origin_policy() {
        let app = app!(state_with(Some(SECRET), OriginPolicy::new(true, &[])));

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation/stats")
            .insert_header(bearer(SECRET))
            .insert_header((header::HOST, "api.vigia.example"))
            .insert_header(("x-forwarded-host", "evil.example"))
            .insert_header((header::REFERER, "https://evil.example/"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation/stats")
            .insert_header(bearer(SECRET))
            .insert_header((header::HOST, "api.vigia.example"))
            .insert_header((header::REFERER, "https://api.vigia.example/admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_huge_page_returns_empty_page() {
        let app = app!(state());

        for i in 0..3 {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": format!("Caso {i}"), "content": "Y" }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation?page=18446744073709551615&limit=2")
            .insert_header(bearer(SECRET))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["posts"], json!([]));
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["pages"], 2);

        let req = test::TestRequest::get()
            .uri("/api/posts?page=18446744073709551615")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_origin_policy_applies_before_credential() {
        let policy = OriginPolicy::new(true, &["https://vigia.example".to_string()]);
        let app = app!(state_with(Some(SECRET), policy));

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation/stats")
            .insert_header(bearer(SECRET))
            .insert_header((header::REFERER, "https://evil.example/"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "forbidden");

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation/stats")
            .insert_header((header::REFERER, "https://vigia.example/admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation/stats")
            .insert_header(bearer(SECRET))
            .insert_header((header::REFERER, "https://vigia.example/admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // Public routes are not subject to the policy.
        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_moderate_error_statuses() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "X", "content": "Y" }))
            .to_request();
        let post: Value = test::call_and_read_body_json(&app, req).await;
        let id = post["id"].as_str().unwrap().to_string();

        let cases = [
            (id.clone(), json!({ "action": "bogus" }), StatusCode::BAD_REQUEST, "invalid_action"),
            (id.clone(), json!({}), StatusCode::BAD_REQUEST, "invalid_action"),
            (
                id.clone(),
                json!({ "action": "reject", "notes": "n".repeat(501) }),
                StatusCode::BAD_REQUEST,
                "invalid_input",
            ),
            (
                "not-an-id".to_string(),
                json!({ "action": "approve" }),
                StatusCode::BAD_REQUEST,
                "invalid_input",
            ),
            (
                uuid::Uuid::new_v4().to_string(),
                json!({ "action": "approve" }),
                StatusCode::NOT_FOUND,
                "not_found",
            ),
        ];

        for (target, body, status, code) in cases {
            let req = test::TestRequest::put()
                .uri(&format!("/api/posts/{target}/moderate"))
                .insert_header(bearer(SECRET))
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{target} {body}");
            let json: Value = test::read_body_json(resp).await;
            assert_eq!(json["code"], code);
        }

        // None of the failures touched the post.
        let req = test::TestRequest::get()
            .uri("/api/posts/moderation/stats")
            .insert_header(bearer(SECRET))
            .to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats, json!({ "pending": 1, "approved": 0, "rejected": 0, "total": 1 }));
    }

    #[actix_rt::test]
    async fn test_moderation_listing_filters_and_paginates() {
        let app = app!(state());

        for i in 0..25 {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": format!("Caso {i}"), "content": "Y" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation?status=pending&page=2&limit=abc")
            .insert_header(bearer(SECRET))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"].as_array().unwrap().len(), 5);
        assert_eq!(body["pagination"]["limit"], 20);
        assert_eq!(body["pagination"]["pages"], 2);

        let req = test::TestRequest::get()
            .uri("/api/posts/moderation?status=archived")
            .insert_header(bearer(SECRET))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_public_stats_and_health() {
        let app = app!(state());

        let req = test::TestRequest::get()
            .uri("/api/posts/stats/public")
            .to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["totalPosts"], 0);
        assert_eq!(stats["totalVotes"], 0);
        assert_eq!(stats["categories"], json!([]));

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let health: Value = test::read_body_json(resp).await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["store"]["backend"], "memory");
        assert_eq!(health["store"]["connected"], true);
        assert_eq!(health["moderationConfigured"], true);
        assert!(!health.to_string().contains(SECRET));
    }
}
