use askama::Template;

use crate::community::threads::ThreadState;
use crate::models::community::{Board, Comment, Post};
use crate::notice::Notice;

fn heading(board: Board) -> &'static str {
    match board {
        Board::Blog => "Blog",
        Board::Forum => "Forum",
    }
}

#[derive(Template)]
#[template(path = "posts.html")]
pub struct PostsView {
    pub board: &'static str,
    pub heading: &'static str,
    pub posts: Vec<Post>,
}

impl PostsView {
    pub fn new(board: Board, posts: Vec<Post>) -> Self {
        Self {
            board: board.collection(),
            heading: heading(board),
            posts,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub reply_count: usize,
    pub expanded: bool,
    /// Empty unless expanded.
    pub replies: Vec<Comment>,
}

#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadView {
    pub notice: Option<Notice>,
    pub board: &'static str,
    pub post: Post,
    pub comments: Vec<CommentView>,
    pub total_comments: usize,
}

impl ThreadView {
    pub fn build(thread: &ThreadState, notice: Option<Notice>) -> Self {
        let comments = thread
            .roots()
            .into_iter()
            .map(|node| {
                let expanded = thread.is_expanded(&node.comment.id);
                CommentView {
                    reply_count: node.replies.len(),
                    expanded,
                    replies: if expanded { node.replies } else { Vec::new() },
                    comment: node.comment,
                }
            })
            .collect();

        Self {
            notice,
            board: thread.board.collection(),
            post: thread.post.clone(),
            comments,
            total_comments: thread.comments().len(),
        }
    }
}
