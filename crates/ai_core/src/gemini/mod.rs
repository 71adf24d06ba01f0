//! Google Gemini inference engine
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`).

mod client;
mod wire;

pub use client::GeminiInferenceEngine;
