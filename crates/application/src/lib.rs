//! Application layer - Use cases and orchestration
//!
//! Contains the forecast and narrative use cases and the port definitions
//! they depend on. Infrastructure adapters implement the ports.

pub mod error;
pub mod ports;
pub mod prompts;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
