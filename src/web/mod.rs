//! HTTP layer for session-todos.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check (no session)
//! - `GET /javascripts/*` - Static scripts from `public/javascripts` (no session)
//! - `GET /` - Redirect to `/lists`
//! - `GET /lists` - All lists
//! - `GET /lists/new` - New list form
//! - `POST /lists` - Create a list
//! - `GET /lists/{id}` - One list with its todos
//! - `GET /lists/{id}/edit` - Edit list form
//! - `POST /lists/{id}` - Rename a list
//! - `POST /lists/{id}/delete` - Delete a list
//! - `POST /lists/{id}/todos` - Add a todo
//! - `POST /lists/{id}/todos/{todo_id}` - Set a todo's completion
//! - `POST /lists/{id}/todos/{todo_id}/delete` - Delete a todo
//! - `POST /lists/{id}/complete_all` - Complete every todo in a list
//!
//! ## Example
//!
//! ```no_run
//! use session_todos::web::{serve, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> session_todos::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 4567);
//!     serve(config, AppState::new()).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod session_layer;
pub mod types;
pub mod views;

pub use handlers::{is_async_origin, AppState};
pub use router::{create_router, create_router_with_state, serve, ServerConfig};
pub use types::{CompletedForm, ListForm, TodoForm};
