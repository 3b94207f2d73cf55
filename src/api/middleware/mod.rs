//! API middleware.

mod auth;

pub use auth::{session_auth, CurrentUser};
