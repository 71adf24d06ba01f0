//! AI Core - Text generation engine
//!
//! Provides the [`InferenceEngine`] abstraction and its Google Gemini
//! implementation, which talks to the `generateContent` REST endpoint.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
