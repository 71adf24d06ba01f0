//! Narrative service - Conversational text for a daily summary

use std::{fmt, sync::Arc, time::Instant};

use domain::DailySummary;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
    prompts::{APOLOGY, CONNECTIVITY_PROMPT, detailed_prompt, fallback_prompt},
};

/// Service turning a [`DailySummary`] into a short forecast
///
/// Generation is attempted with the full prompt, then once with a reduced
/// prompt. If both fail the fixed apology text is returned; no error ever
/// reaches the caller.
pub struct NarrativeService {
    inference: Arc<dyn InferencePort>,
}

impl fmt::Debug for NarrativeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeService").finish_non_exhaustive()
    }
}

impl NarrativeService {
    /// Create a new narrative service
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Generate the narrative for `summary`
    #[instrument(skip(self, summary), fields(city = %summary.city))]
    pub async fn narrate(&self, summary: &DailySummary) -> String {
        match self.attempt(&detailed_prompt(summary)).await {
            Ok(text) => return text,
            Err(e) => warn!(error = %e, "Forecast generation failed, retrying with reduced prompt"),
        }

        match self.attempt(&fallback_prompt(summary)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Reduced prompt also failed");
                APOLOGY.to_string()
            },
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String, ApplicationError> {
        let start = Instant::now();
        let InferenceResult {
            content,
            model,
            tokens_used,
            ..
        } = self.inference.generate(prompt).await?;

        let text = content.trim();
        if text.is_empty() {
            return Err(ApplicationError::Inference(
                "model returned empty text".to_string(),
            ));
        }

        debug!(
            model = %model,
            tokens = ?tokens_used,
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Forecast text generated"
        );

        Ok(text.to_string())
    }

    /// Send the connectivity prompt and return the model's answer
    ///
    /// Unlike [`Self::narrate`], failures are returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails or yields no text.
    pub async fn probe(&self) -> Result<String, ApplicationError> {
        self.attempt(CONNECTIVITY_PROMPT).await
    }

    /// Check if the underlying inference is healthy
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Get the current model name
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }
}
