//! Form bodies accepted by the handlers.
//!
//! Every field defaults to the empty string, so a missing field surfaces
//! as an ordinary length validation error.

use serde::Deserialize;

/// Body of `POST /lists` and `POST /lists/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListForm {
    #[serde(default)]
    pub list_name: String,
}

/// Body of `POST /lists/{id}/todos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

/// Body of `POST /lists/{id}/todos/{todo_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletedForm {
    #[serde(default)]
    pub completed: String,
}

impl CompletedForm {
    /// Only the exact string `"true"` marks a todo completed.
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}
