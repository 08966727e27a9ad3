use std::fmt;

use askama::Template;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// Transient toast rendered at the top of a list fragment.
#[derive(Debug, Clone, Template)]
#[template(path = "partials/notice.html")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Notice::error(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_escapes_message() {
        let html = Notice::error("<script>alert(1)</script>").render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"data-level="error""#));
    }

    #[test]
    fn test_notice_from_error_uses_user_message() {
        let notice = Notice::from(&AppError::NotIdentified);
        assert!(notice.is_error());
        assert_eq!(notice.message, "Please sign in to continue.");
    }
}
