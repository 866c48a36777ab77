//! End-to-end workflow tests: submission, moderation and public queries
//! running against the in-memory post store.

use std::sync::Arc;

use vigia_core::domain::{Category, MODERATOR_LABEL, PostStatus, Submission};
use vigia_core::error::DomainError;
use vigia_core::pagination::PageRequest;
use vigia_core::ports::{BaseRepository, PostRepository};
use vigia_core::services::{ModerationService, QueryService, SubmissionService};
use vigia_infra::InMemoryPostRepository;

struct Board {
    repo: Arc<InMemoryPostRepository>,
    submissions: SubmissionService,
    moderation: ModerationService,
    queries: QueryService,
}

fn board() -> Board {
    let repo = Arc::new(InMemoryPostRepository::new());
    let posts: Arc<dyn PostRepository> = repo.clone();
    Board {
        repo,
        submissions: SubmissionService::new(posts.clone()),
        moderation: ModerationService::new(posts.clone()),
        queries: QueryService::new(posts),
    }
}

fn report(title: &str, category: &str) -> Submission {
    Submission {
        title: Some(title.to_string()),
        content: Some("Detalles del caso".to_string()),
        category: Some(category.to_string()),
        link: None,
    }
}

#[tokio::test]
async fn test_submission_lands_pending() {
    let board = board();

    let post = board.submissions.submit(report("X", "gobierno")).await.unwrap();

    assert_eq!(post.status, PostStatus::Pending);
    assert_eq!(post.category, Category::Gobierno);
    assert!(post.moderated_by.is_none());
    assert!(post.moderation_date.is_none());

    let stored = board.repo.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored, post);
}

#[tokio::test]
async fn test_invalid_submission_writes_nothing() {
    let board = board();

    let too_long = Submission {
        title: Some("t".repeat(256)),
        ..report("", "general")
    };
    let err = board.submissions.submit(too_long).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { field: "title", .. }));

    let err = board
        .submissions
        .submit(Submission {
            content: Some("c".repeat(5001)),
            ..report("ok", "general")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { field: "content", .. }));

    let all = board
        .moderation
        .list(None, PageRequest::new(1, 50))
        .await
        .unwrap();
    assert_eq!(all.total, 0);
}

#[tokio::test]
async fn test_approve_moves_post_between_queues() {
    let board = board();
    let post = board.submissions.submit(report("X", "gobierno")).await.unwrap();

    let approved = board
        .moderation
        .moderate(&post.id.to_string(), "approve", Some("  verificado  "))
        .await
        .unwrap();

    assert_eq!(approved.status, PostStatus::Approved);
    assert_eq!(approved.moderated_by.as_deref(), Some(MODERATOR_LABEL));
    assert!(approved.moderation_date.is_some());
    assert_eq!(approved.moderation_notes.as_deref(), Some("verificado"));

    let approved_list = board
        .moderation
        .list(Some("approved"), PageRequest::new(1, 20))
        .await
        .unwrap();
    assert!(approved_list.items.iter().any(|p| p.id == post.id));

    let pending_list = board
        .moderation
        .list(Some("pending"), PageRequest::new(1, 20))
        .await
        .unwrap();
    assert!(pending_list.items.iter().all(|p| p.id != post.id));

    let public = board
        .queries
        .list_public(Some("gobierno"), PageRequest::new(1, 10))
        .await
        .unwrap();
    assert_eq!(public.items.len(), 1);

    let other = board
        .queries
        .list_public(Some("salud"), PageRequest::new(1, 10))
        .await
        .unwrap();
    assert!(other.items.is_empty());
}

#[tokio::test]
async fn test_bogus_action_leaves_status_unchanged() {
    let board = board();
    let post = board.submissions.submit(report("X", "general")).await.unwrap();

    let err = board
        .moderation
        .moderate(&post.id.to_string(), "bogus", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidAction(_)));

    let stored = board.repo.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PostStatus::Pending);
}

#[tokio::test]
async fn test_moderate_unknown_and_malformed_ids() {
    let board = board();

    let missing = uuid::Uuid::new_v4();
    let err = board
        .moderation
        .moderate(&missing.to_string(), "approve", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id, .. } if id == missing));

    let err = board
        .moderation
        .moderate("not-an-id", "approve", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { field: "id", .. }));
}

#[tokio::test]
async fn test_remoderation_overwrites_decision() {
    let board = board();
    let post = board.submissions.submit(report("X", "salud")).await.unwrap();
    let id = post.id.to_string();

    board.moderation.moderate(&id, "approve", Some("ok")).await.unwrap();
    let rejected = board.moderation.moderate(&id, "reject", None).await.unwrap();

    assert_eq!(rejected.status, PostStatus::Rejected);
    // Notes are cleared, not kept from the earlier decision.
    assert_eq!(rejected.moderation_notes.as_deref(), Some(""));

    let public = board
        .queries
        .list_public(None, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert!(public.items.is_empty());
}

#[tokio::test]
async fn test_public_listing_pagination() {
    let board = board();
    for i in 0..25 {
        let post = board
            .submissions
            .submit(report(&format!("Caso {i}"), "educacion"))
            .await
            .unwrap();
        board
            .moderation
            .moderate(&post.id.to_string(), "approve", None)
            .await
            .unwrap();
    }
    // Pending posts never show up publicly.
    board.submissions.submit(report("Pendiente", "educacion")).await.unwrap();

    let mut seen = std::collections::HashSet::new();
    for (page, expected) in [(1, 10), (2, 10), (3, 5), (4, 0)] {
        let result = board
            .queries
            .list_public(None, PageRequest::new(page, 10))
            .await
            .unwrap();
        assert_eq!(result.items.len(), expected, "page {page}");
        assert_eq!(result.total, 25);
        assert_eq!(result.pages, 3);
        for post in result.items {
            assert_eq!(post.status, PostStatus::Approved);
            assert!(seen.insert(post.id), "post repeated across pages");
        }
    }
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_public_stats_only_count_approved() {
    let board = board();
    for (category, approve) in [
        ("salud", true),
        ("salud", true),
        ("justicia", true),
        ("empresas", false),
        ("gobierno", false),
    ] {
        let post = board.submissions.submit(report("r", category)).await.unwrap();
        if approve {
            board
                .moderation
                .moderate(&post.id.to_string(), "approve", None)
                .await
                .unwrap();
        }
    }
    let rejected = board.submissions.submit(report("r", "empresas")).await.unwrap();
    board
        .moderation
        .moderate(&rejected.id.to_string(), "reject", None)
        .await
        .unwrap();

    let stats = board.queries.public_stats().await.unwrap();
    assert_eq!(stats.total_posts, 3);
    assert_eq!(stats.total_votes, 0);
    let categories: Vec<(Category, u64)> = stats
        .categories
        .iter()
        .map(|c| (c.category, c.count))
        .collect();
    assert_eq!(
        categories,
        vec![(Category::Salud, 2), (Category::Justicia, 1)]
    );

    let by_status = board.moderation.stats().await.unwrap();
    assert_eq!(by_status.pending, 2);
    assert_eq!(by_status.approved, 3);
    assert_eq!(by_status.rejected, 1);
    assert_eq!(by_status.total, 6);
}

#[tokio::test]
async fn test_unknown_filters_rejected() {
    let board = board();

    let err = board
        .queries
        .list_public(Some("deportes"), PageRequest::new(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { field: "category", .. }));

    let err = board
        .moderation
        .list(Some("archived"), PageRequest::new(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput { field: "status", .. }));
}
