// ABOUTME: Tests for status comment discovery, cleanup, and replacement.
// ABOUTME: Uses the in-memory GitHub fake to observe call ordering.

mod support;

use support::{FakeGitHub, GitHubCall, GitHubOp, comment};
use vercel_deploy::comment::{COMMENT_MARKER, CommentManager, CommentPolicy};
use vercel_deploy::diagnostics::{Diagnostics, WarningKind};
use vercel_deploy::types::PullNumber;

fn marked(text: &str) -> String {
    format!("{COMMENT_MARKER}\n{text}")
}

const PULL: PullNumber = PullNumber::new(8);

#[tokio::test]
async fn find_existing_returns_newest_marked_comment() {
    let github = FakeGitHub::new().with_comments(vec![
        comment(1, &marked("first")),
        comment(2, "unrelated"),
        comment(3, &marked("second")),
    ]);

    let found = CommentManager::new(&github)
        .find_existing(PULL)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id.as_str(), "3");
}

#[tokio::test]
async fn find_existing_ignores_foreign_comments() {
    let github = FakeGitHub::new().with_comments(vec![comment(2, "LGTM")]);

    let found = CommentManager::new(&github).find_existing(PULL).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn delete_existing_without_match_is_a_no_op() {
    let github = FakeGitHub::new().with_comments(vec![comment(2, "LGTM")]);
    let mut diag = Diagnostics::default();

    let deleted = CommentManager::new(&github)
        .delete_existing(PULL, &mut diag)
        .await;

    assert!(deleted.is_none());
    assert!(!diag.has_warnings());
    assert_eq!(github.comments().len(), 1);
}

#[tokio::test]
async fn delete_existing_removes_every_marked_comment() {
    let github = FakeGitHub::new().with_comments(vec![
        comment(1, &marked("first")),
        comment(2, "LGTM"),
        comment(3, &marked("second")),
    ]);
    let mut diag = Diagnostics::default();

    let deleted = CommentManager::new(&github)
        .delete_existing(PULL, &mut diag)
        .await;

    assert_eq!(deleted.map(|id| id.to_string()), Some("3".to_string()));
    let remaining = github.comments();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id.as_str(), "2");
}

#[tokio::test]
async fn listing_failure_is_recorded_not_raised() {
    let github = FakeGitHub::new().fail_on(GitHubOp::ListComments);
    let mut diag = Diagnostics::default();

    let deleted = CommentManager::new(&github)
        .delete_existing(PULL, &mut diag)
        .await;

    assert!(deleted.is_none());
    assert_eq!(diag.warnings()[0].kind, WarningKind::CommentCleanup);
}

#[tokio::test]
async fn replace_deletes_before_creating() {
    let github = FakeGitHub::new().with_comments(vec![comment(1, &marked("old"))]);
    let mut diag = Diagnostics::default();
    let policy = CommentPolicy {
        delete_existing: true,
        create: true,
    };

    let created = CommentManager::new(&github)
        .replace(PULL, &marked("new"), policy, &mut diag)
        .await
        .unwrap()
        .unwrap();

    assert!(created.body().ends_with("new"));
    assert_eq!(
        github.calls(),
        vec![
            GitHubCall::ListComments(8),
            GitHubCall::DeleteComment("1".to_string()),
            GitHubCall::CreateComment {
                pull: 8,
                body: marked("new"),
            },
        ]
    );
    assert_eq!(github.comments().len(), 1);
}

#[tokio::test]
async fn replace_without_create_only_cleans_up() {
    let github = FakeGitHub::new().with_comments(vec![comment(1, &marked("old"))]);
    let mut diag = Diagnostics::default();
    let policy = CommentPolicy {
        delete_existing: true,
        create: false,
    };

    let created = CommentManager::new(&github)
        .replace(PULL, &marked("new"), policy, &mut diag)
        .await
        .unwrap();

    assert!(created.is_none());
    assert!(github.comments().is_empty());
}

#[tokio::test]
async fn create_failure_is_raised() {
    let github = FakeGitHub::new().fail_on(GitHubOp::CreateComment);
    let mut diag = Diagnostics::default();
    let policy = CommentPolicy {
        delete_existing: false,
        create: true,
    };

    let result = CommentManager::new(&github)
        .replace(PULL, "body", policy, &mut diag)
        .await;

    assert_eq!(result.unwrap_err().status(), Some(500));
}
