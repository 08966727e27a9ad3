use std::collections::{HashMap, HashSet};

use crate::models::community::{Board, Comment, Post};

/// A top-level comment with every reply beneath it, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Comments of one post plus which reply lists the user has expanded.
#[derive(Debug, Clone)]
pub struct ThreadState {
    pub board: Board,
    pub post: Post,
    comments: Vec<Comment>,
    expanded: HashSet<String>,
}

impl ThreadState {
    pub fn new(board: Board, post: Post, comments: Vec<Comment>) -> Self {
        Self {
            board,
            post,
            comments,
            expanded: HashSet::new(),
        }
    }

    /// Swaps in a fresh fetch. Expansion survives for comments that still exist.
    pub fn replace(&mut self, post: Post, comments: Vec<Comment>) {
        self.expanded.retain(|id| comments.iter().any(|c| &c.id == id));
        self.post = post;
        self.comments = comments;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_expanded(&self, comment_id: &str) -> bool {
        self.expanded.contains(comment_id)
    }

    /// Flips the reply list of a top-level comment. False if no such comment.
    pub fn toggle_replies(&mut self, comment_id: &str) -> bool {
        if !self.comments.iter().any(|c| c.id == comment_id) {
            return false;
        }
        if !self.expanded.remove(comment_id) {
            self.expanded.insert(comment_id.to_string());
        }
        true
    }

    /// Groups comments by their root, keeping the backend's order within each group.
    ///
    /// Comments whose parent is unknown, or whose parent chain loops, count as
    /// top-level.
    pub fn roots(&self) -> Vec<CommentNode> {
        let by_id: HashMap<&str, &Comment> =
            self.comments.iter().map(|c| (c.id.as_str(), c)).collect();

        let root_of = |comment: &Comment| -> Option<String> {
            let mut seen = HashSet::new();
            let mut current = comment;
            seen.insert(current.id.as_str());
            while let Some(parent) = current
                .parent_id
                .as_deref()
                .and_then(|p| by_id.get(p).copied())
            {
                if !seen.insert(parent.id.as_str()) {
                    return None;
                }
                current = parent;
            }
            (current.id != comment.id).then(|| current.id.clone())
        };

        let mut nodes: Vec<CommentNode> = Vec::new();
        let mut replies: Vec<(String, Comment)> = Vec::new();
        for comment in &self.comments {
            match root_of(comment) {
                Some(root) => replies.push((root, comment.clone())),
                None => nodes.push(CommentNode {
                    comment: comment.clone(),
                    replies: Vec::new(),
                }),
            }
        }

        for (root, reply) in replies {
            match nodes.iter_mut().find(|n| n.comment.id == root) {
                Some(node) => node.replies.push(reply),
                None => nodes.push(CommentNode {
                    comment: reply,
                    replies: Vec::new(),
                }),
            }
        }
        nodes
    }
}
