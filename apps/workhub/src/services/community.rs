use tracing::info;

use crate::api_client::{execute, fetch, ApiRequest, Transport};
use crate::errors::AppError;
use crate::models::community::{Board, Comment, NewComment, Post};

/// GET /blogs | /forums
pub async fn list_posts(transport: &dyn Transport, board: Board) -> Result<Vec<Post>, AppError> {
    fetch(transport, ApiRequest::get(format!("/{}", board.collection()))).await
}

/// GET /blogs/:id/comments | /forums/:id/comments
pub async fn list_comments(
    transport: &dyn Transport,
    board: Board,
    post_id: &str,
) -> Result<Vec<Comment>, AppError> {
    fetch(
        transport,
        ApiRequest::get(format!("/{}/{post_id}/comments", board.collection())),
    )
    .await
}

/// POST /blogs/:id/comments | /forums/:id/comments
///
/// A `parent_id` turns the comment into a reply.
pub async fn post_comment(
    transport: &dyn Transport,
    board: Board,
    post_id: &str,
    comment: &NewComment,
) -> Result<(), AppError> {
    if comment.body.trim().is_empty() {
        return Err(AppError::Validation("Write something before posting.".to_string()));
    }

    execute(
        transport,
        ApiRequest::post(
            format!("/{}/{post_id}/comments", board.collection()),
            comment,
        )?,
    )
    .await?;
    info!(
        "comment posted on {board} {post_id} (reply: {})",
        comment.parent_id.is_some()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::FakeBackend;
    use crate::api_client::RequestBody;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_forum_and_blog_use_separate_collections() {
        let backend = FakeBackend::new();
        backend.respond_ok(Method::GET, "/forums/f1/comments", json!([]));
        backend.respond_ok(Method::GET, "/blogs/f1/comments", json!([{
            "id": "c1", "postId": "f1", "authorName": "Ana",
            "body": "Nice", "createdAt": "2024-01-01T00:00:00Z"
        }]));

        assert!(list_comments(&backend, Board::Forum, "f1").await.unwrap().is_empty());
        assert_eq!(list_comments(&backend, Board::Blog, "f1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_carries_parent_id() {
        let backend = FakeBackend::new();
        backend.respond_ok(Method::POST, "/blogs/b1/comments", json!(null));

        let reply = NewComment {
            author_id: "u1".to_string(),
            body: "Agreed".to_string(),
            parent_id: Some("c1".to_string()),
        };
        post_comment(&backend, Board::Blog, "b1", &reply).await.unwrap();

        let sent = backend.requests_to(Method::POST, "/blogs/b1/comments");
        match &sent[0].body {
            RequestBody::Json(body) => assert_eq!(body["parentId"], "c1"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected_locally() {
        let backend = FakeBackend::new();
        let blank = NewComment {
            author_id: "u1".to_string(),
            body: "   ".to_string(),
            parent_id: None,
        };
        let err = post_comment(&backend, Board::Forum, "f1", &blank)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.requests().is_empty());
    }
}
