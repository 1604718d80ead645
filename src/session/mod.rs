//! Session management module.
//!
//! Each browser session owns a collection of todo lists and a flash
//! message slot. Sessions live only in memory and expire after a period
//! of inactivity.

mod flash;
mod id;
mod store;

pub use flash::Flash;
pub use id::SessionId;
pub use store::{Session, SessionConfig, SessionStore, DEFAULT_IDLE_TIMEOUT_SECS};
