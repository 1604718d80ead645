//! List and todo model.
//!
//! This module holds the in-memory representation of a session's lists,
//! the rules for assigning ids, and the validation applied before any
//! mutation.

mod id;
mod list;
mod lists;
mod sort;
mod validation;

pub use id::{ListId, TodoId};
pub use list::{Todo, TodoList};
pub use lists::Lists;
pub use sort::{sorted_view, Completion};
pub use validation::{
    validate_list_name, validate_list_name_except, validate_todo_name, ValidationError,
    MAX_NAME_LENGTH, MIN_NAME_LENGTH,
};
