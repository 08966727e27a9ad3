// Blogs and forums: post lists and comment threads with collapsible replies.
// Both boards share handlers; the router injects which one via an extension.

pub mod handlers;
pub mod threads;
pub mod view;

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::api_client::Transport;
use crate::community::threads::ThreadState;
use crate::errors::AppError;
use crate::models::community::{Board, Comment, Post};
use crate::services;

pub type ThreadMap = HashMap<(Board, String), ThreadState>;

/// Fetches a post and its comments together.
pub async fn load_thread(
    transport: &dyn Transport,
    board: Board,
    post_id: &str,
) -> Result<(Post, Vec<Comment>), AppError> {
    let (posts, comments) = tokio::try_join!(
        services::community::list_posts(transport, board),
        services::community::list_comments(transport, board, post_id),
    )?;
    let post = posts
        .into_iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id}")))?;
    Ok((post, comments))
}

/// Re-fetches a thread into `threads`, keeping its expanded reply lists.
pub async fn refresh_thread(
    transport: &dyn Transport,
    threads: &Mutex<ThreadMap>,
    board: Board,
    post_id: &str,
) -> Result<(), AppError> {
    let (post, comments) = load_thread(transport, board, post_id).await?;
    let mut threads = threads.lock().await;
    match threads.get_mut(&(board, post_id.to_string())) {
        Some(thread) => thread.replace(post, comments),
        None => {
            threads.insert(
                (board, post_id.to_string()),
                ThreadState::new(board, post, comments),
            );
        }
    }
    Ok(())
}

/// Drops every cached thread of `board`. Called whenever its post list is shown,
/// so the map holds at most the threads opened since.
pub fn forget_board(threads: &mut ThreadMap, board: Board) {
    threads.retain(|(b, _), _| *b != board);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::testing::FakeBackend;
    use reqwest::Method;
    use serde_json::json;

    fn backend() -> FakeBackend {
        let backend = FakeBackend::new();
        backend.respond_ok(
            Method::GET,
            "/forums",
            json!([{ "id": "f1", "title": "Salaries", "authorName": "Ana",
                     "createdAt": "2024-04-01T10:00:00Z" }]),
        );
        backend.respond_ok(
            Method::GET,
            "/forums/f1/comments",
            json!([{ "id": "c1", "postId": "f1", "authorName": "Luis",
                     "body": "Depends", "createdAt": "2024-04-01T11:00:00Z" }]),
        );
        backend
    }

    #[tokio::test]
    async fn test_refresh_keeps_expanded_state() {
        let backend = backend();
        let threads = Mutex::new(ThreadMap::new());
        refresh_thread(&backend, &threads, Board::Forum, "f1").await.unwrap();
        threads
            .lock()
            .await
            .get_mut(&(Board::Forum, "f1".to_string()))
            .unwrap()
            .toggle_replies("c1");

        refresh_thread(&backend, &threads, Board::Forum, "f1").await.unwrap();
        let threads = threads.lock().await;
        let thread = &threads[&(Board::Forum, "f1".to_string())];
        assert!(thread.is_expanded("c1"));
        assert_eq!(thread.post.title, "Salaries");
    }

    #[tokio::test]
    async fn test_forget_board_keeps_other_board() {
        let backend = backend();
        backend.respond_ok(
            Method::GET,
            "/blogs",
            json!([{ "id": "b1", "title": "Hiring", "authorName": "Eva",
                     "createdAt": "2024-04-02T10:00:00Z" }]),
        );
        backend.respond_ok(Method::GET, "/blogs/b1/comments", json!([]));
        let threads = Mutex::new(ThreadMap::new());
        refresh_thread(&backend, &threads, Board::Forum, "f1").await.unwrap();
        refresh_thread(&backend, &threads, Board::Blog, "b1").await.unwrap();

        let mut threads = threads.lock().await;
        forget_board(&mut threads, Board::Forum);
        assert!(!threads.contains_key(&(Board::Forum, "f1".to_string())));
        assert!(threads.contains_key(&(Board::Blog, "b1".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found() {
        let backend = backend();
        backend.respond_ok(Method::GET, "/forums/zz/comments", json!([]));
        let err = load_thread(&backend, Board::Forum, "zz").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
