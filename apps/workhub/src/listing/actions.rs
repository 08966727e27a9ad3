//! Delegated UI actions.
//!
//! Rendered markup carries `data-action`, `data-id` and optionally
//! `data-value`; the client posts them back as a form and the owning list
//! controller dispatches the parsed `UiAction`.

use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ActionForm {
    pub action: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// `value` is the new read state.
    ToggleRead { id: String, read: bool },
    MarkAllRead,
    ClearFilters,
    RemoveFavorite { id: String },
    ToggleReplies { id: String },
    Paginate { page: usize },
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::ToggleRead { .. } => "toggle-read",
            UiAction::MarkAllRead => "mark-all-read",
            UiAction::ClearFilters => "clear-filters",
            UiAction::RemoveFavorite { .. } => "remove-favorite",
            UiAction::ToggleReplies { .. } => "toggle-replies",
            UiAction::Paginate { .. } => "paginate",
        }
    }

    /// Error for an action the receiving list does not support.
    pub fn unsupported(&self, list: &str) -> AppError {
        AppError::Validation(format!("'{}' is not available on {list}", self.name()))
    }
}

impl TryFrom<ActionForm> for UiAction {
    type Error = AppError;

    fn try_from(form: ActionForm) -> Result<Self, Self::Error> {
        let id = || {
            form.id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| AppError::Validation(format!("'{}' needs a record id", form.action)))
        };

        match form.action.as_str() {
            "toggle-read" => {
                let read = match form.value.as_deref() {
                    Some("true") => true,
                    Some("false") => false,
                    _ => {
                        return Err(AppError::Validation(
                            "'toggle-read' needs value=true|false".to_string(),
                        ))
                    }
                };
                Ok(UiAction::ToggleRead { id: id()?, read })
            }
            "mark-all-read" => Ok(UiAction::MarkAllRead),
            "clear-filters" => Ok(UiAction::ClearFilters),
            "remove-favorite" => Ok(UiAction::RemoveFavorite { id: id()? }),
            "toggle-replies" => Ok(UiAction::ToggleReplies { id: id()? }),
            "paginate" => {
                let page = form
                    .value
                    .as_deref()
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|p| *p > 0)
                    .ok_or_else(|| AppError::Validation("Invalid page number".to_string()))?;
                Ok(UiAction::Paginate { page })
            }
            other => Err(AppError::Validation(format!("Unknown action '{other}'"))),
        }
    }
}
