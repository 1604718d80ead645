//! Error types for session-todos.

use thiserror::Error;

use crate::todo::{ListId, TodoId, ValidationError};

/// Main error type for session-todos operations.
#[derive(Error, Debug)]
pub enum TodoError {
    /// List with the given ID was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// Todo with the given ID was not found in its list.
    #[error("todo {todo_id} not found in list {list_id}")]
    TodoNotFound { list_id: ListId, todo_id: TodoId },

    /// A name failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session with the given ID was not found or has expired.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    /// Whether this error is one of the not-found conditions.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TodoError::ListNotFound(_) | TodoError::TodoNotFound { .. }
        )
    }

    /// Message shown to the user for recoverable errors.
    ///
    /// Returns `None` for internal failures, which are not surfaced.
    pub fn user_message(&self) -> Option<String> {
        match self {
            TodoError::ListNotFound(_) => Some("The specified list was not found.".to_string()),
            TodoError::TodoNotFound { .. } => Some("The specified todo was not found.".to_string()),
            TodoError::Validation(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

/// Convenience Result type for session-todos operations.
pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_not_found_display() {
        let err = TodoError::ListNotFound(ListId::from_raw(7));
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains('7'));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_todo_not_found_display() {
        let err = TodoError::TodoNotFound {
            list_id: ListId::from_raw(1),
            todo_id: TodoId::from_raw(3),
        };
        assert_eq!(err.to_string(), "todo 3 not found in list 1");
        assert_eq!(
            err.user_message().as_deref(),
            Some("The specified todo was not found.")
        );
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let err: TodoError = ValidationError::TodoNameLength.into();
        assert_eq!(
            err.to_string(),
            "Todo name must be between 1 and 100 characters."
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_internal_errors_have_no_user_message() {
        assert!(TodoError::LockPoisoned.user_message().is_none());
        assert!(TodoError::SessionNotFound("abc".into())
            .user_message()
            .is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: TodoError = io_err.into();
        assert!(matches!(err, TodoError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
