//! Data models for the application.

mod session;
mod user;

pub use session::{AuthResponse, Session};
pub use user::User;
