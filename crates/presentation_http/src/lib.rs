//! Mausam HTTP presentation layer
//!
//! Serves the forecast web page and a small JSON API.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
