//! # session-todos
//!
//! Session-backed todo list manager served over HTTP.
//!
//! Each browser session owns a set of named todo lists held in server
//! memory. Lists and todos carry stable ids that are never reused, names
//! are validated before any change, and display order always puts
//! unfinished work first.
//!
//! ## Features
//!
//! - **List/Todo model**: explicit ids, validation, completion tracking
//! - **Session store**: in-memory, cookie-keyed, idle expiry
//! - **Web layer**: axum handlers with flash messages and redirects
//!
//! ## Quick Start
//!
//! ```
//! use session_todos::{ListId, Lists};
//!
//! let mut lists = Lists::new();
//! let id = lists.create("Groceries")?.id;
//!
//! let list = lists.find_mut(id)?;
//! list.add_todo("Milk")?;
//! list.complete_all();
//!
//! assert!(lists.find(id)?.is_complete());
//! assert!(lists.find(ListId::from_raw(99)).is_err());
//! # Ok::<(), session_todos::TodoError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod todo;
pub mod web;

// Re-export commonly used types
pub use error::{Result, TodoError};
pub use session::{Flash, Session, SessionConfig, SessionId, SessionStore};
pub use todo::{sorted_view, ListId, Lists, Todo, TodoId, TodoList, ValidationError};
pub use web::{create_router_with_state, serve, AppState, ServerConfig};
