//! Name validation rules.
//!
//! These are pure checks run before any mutation. The `Display` output of
//! [`ValidationError`] is the message shown to the user.

use thiserror::Error;

use super::{ListId, TodoList};

/// Minimum name length in characters.
pub const MIN_NAME_LENGTH: usize = 1;

/// Maximum name length in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// A name was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("List name must be between 1 and 100 characters.")]
    ListNameLength,

    #[error("List name must be unique.")]
    ListNameTaken,

    #[error("Todo name must be between 1 and 100 characters.")]
    TodoNameLength,
}

fn has_valid_length(name: &str) -> bool {
    (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name.chars().count())
}

/// Validate a name for a new list.
pub fn validate_list_name(name: &str, existing: &[TodoList]) -> Result<(), ValidationError> {
    validate_list_name_inner(name, existing, None)
}

/// Validate a new name for the list `renaming`.
///
/// The list being renamed does not collide with itself.
pub fn validate_list_name_except(
    name: &str,
    existing: &[TodoList],
    renaming: ListId,
) -> Result<(), ValidationError> {
    validate_list_name_inner(name, existing, Some(renaming))
}

fn validate_list_name_inner(
    name: &str,
    existing: &[TodoList],
    skip: Option<ListId>,
) -> Result<(), ValidationError> {
    if !has_valid_length(name) {
        return Err(ValidationError::ListNameLength);
    }

    let taken = existing
        .iter()
        .filter(|list| Some(list.id) != skip)
        .any(|list| list.name == name);
    if taken {
        return Err(ValidationError::ListNameTaken);
    }

    Ok(())
}

/// Validate a todo name.
pub fn validate_todo_name(name: &str) -> Result<(), ValidationError> {
    if has_valid_length(name) {
        Ok(())
    } else {
        Err(ValidationError::TodoNameLength)
    }
}
