//! Request handlers.

pub mod analyze;
pub mod auth;
pub mod health;
pub mod sports;

pub use analyze::*;
pub use auth::*;
pub use health::*;
pub use sports::*;
