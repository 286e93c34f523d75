//! HTTP gateway for the snip URL shortener.
//!
//! Exposes URL creation and redirection over HTTP and maps shortener
//! failures to status codes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
