use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
    Extension, Form,
};
use serde::Deserialize;
use tracing::warn;

use crate::community::view::{PostsView, ThreadView};
use crate::community::{forget_board, refresh_thread, ThreadMap};
use crate::errors::AppError;
use crate::listing::actions::{ActionForm, UiAction};
use crate::models::community::{Board, NewComment};
use crate::notice::Notice;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

fn render_thread(
    threads: &ThreadMap,
    board: Board,
    post_id: &str,
    notice: Option<Notice>,
) -> Result<Html<String>, AppError> {
    let thread = threads
        .get(&(board, post_id.to_string()))
        .ok_or_else(|| AppError::MissingData(format!("Thread {post_id}")))?;
    Ok(Html(ThreadView::build(thread, notice).render()?))
}

/// GET /blogs | /forums
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Extension(board): Extension<Board>,
) -> Result<Html<String>, AppError> {
    let posts = services::community::list_posts(state.transport.as_ref(), board).await?;
    forget_board(&mut *state.lists.threads.lock().await, board);
    Ok(Html(PostsView::new(board, posts).render()?))
}

/// GET /blogs/:id | /forums/:id
pub async fn handle_thread(
    State(state): State<AppState>,
    Extension(board): Extension<Board>,
    Path(post_id): Path<String>,
) -> Result<Html<String>, AppError> {
    refresh_thread(state.transport.as_ref(), &state.lists.threads, board, &post_id).await?;
    let threads = state.lists.threads.lock().await;
    render_thread(&threads, board, &post_id, None)
}

/// POST /blogs/:id/comments | /forums/:id/comments
/// The thread is re-fetched whether or not the comment was accepted.
pub async fn handle_post_comment(
    State(state): State<AppState>,
    Extension(board): Extension<Board>,
    Path(post_id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Html<String>, AppError> {
    let user = state.current_user().await?;
    let transport = state.transport.as_ref();

    let comment = NewComment {
        author_id: user.id,
        body: form.body.trim().to_string(),
        parent_id: form.parent_id.filter(|p| !p.trim().is_empty()),
    };
    let mut notice = match services::community::post_comment(transport, board, &post_id, &comment).await {
        Ok(()) if comment.parent_id.is_some() => Notice::success("Reply posted."),
        Ok(()) => Notice::success("Comment posted."),
        Err(e) => Notice::from(&e),
    };

    if let Err(e) = refresh_thread(transport, &state.lists.threads, board, &post_id).await {
        warn!("could not refresh {board} thread {post_id}: {e}");
        if !notice.is_error() {
            notice = Notice::info("Posted, but the thread could not be refreshed.");
        }
    }

    let threads = state.lists.threads.lock().await;
    if !threads.contains_key(&(board, post_id.clone())) {
        return Ok(Html(notice.render()?));
    }
    render_thread(&threads, board, &post_id, Some(notice))
}

/// POST /blogs/:id/actions | /forums/:id/actions
pub async fn handle_thread_action(
    State(state): State<AppState>,
    Extension(board): Extension<Board>,
    Path(post_id): Path<String>,
    Form(form): Form<ActionForm>,
) -> Result<Html<String>, AppError> {
    let action = UiAction::try_from(form)?;
    let cached = state
        .lists
        .threads
        .lock()
        .await
        .contains_key(&(board, post_id.clone()));
    if !cached {
        refresh_thread(state.transport.as_ref(), &state.lists.threads, board, &post_id).await?;
    }
    let mut threads = state.lists.threads.lock().await;

    match action {
        UiAction::ToggleReplies { id } => {
            let thread = threads
                .get_mut(&(board, post_id.clone()))
                .ok_or_else(|| AppError::MissingData(format!("Thread {post_id}")))?;
            if !thread.toggle_replies(&id) {
                return Err(AppError::MissingData(format!("Comment {id}")));
            }
        }
        other => return Err(other.unsupported(board.collection())),
    }
    render_thread(&threads, board, &post_id, None)
}
