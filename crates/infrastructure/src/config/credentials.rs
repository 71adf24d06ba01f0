//! API keys read from the process environment
//!
//! Keys live outside [`super::AppConfig`] so the tunables can be logged and
//! serialized without leaking secrets. A `.env` file in the working
//! directory is honoured.

use std::fmt;

use application::ApplicationError;
use secrecy::SecretString;
use tracing::debug;

/// Environment variable holding the OpenWeatherMap key
pub const OPENWEATHER_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Environment variable holding the Gemini key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// The two API keys, either of which may be absent
#[derive(Clone, Default)]
pub struct Credentials {
    openweather_api_key: Option<SecretString>,
    gemini_api_key: Option<SecretString>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openweather_api_key", &self.has_openweather_key())
            .field("gemini_api_key", &self.has_gemini_key())
            .finish()
    }
}

impl Credentials {
    /// Read both keys from the environment after loading `.env`
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => debug!(error = %e, "Ignoring unreadable .env file"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through `lookup`
    ///
    /// Blank values are treated as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(SecretString::from)
        };

        Self {
            openweather_api_key: read(OPENWEATHER_API_KEY_VAR),
            gemini_api_key: read(GEMINI_API_KEY_VAR),
        }
    }

    pub const fn has_openweather_key(&self) -> bool {
        self.openweather_api_key.is_some()
    }

    pub const fn has_gemini_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    /// The OpenWeatherMap key
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` when the key is absent.
    pub fn openweather_api_key(&self) -> Result<&SecretString, ApplicationError> {
        self.openweather_api_key
            .as_ref()
            .ok_or_else(|| ApplicationError::MissingCredential(OPENWEATHER_API_KEY_VAR.to_string()))
    }

    /// The Gemini key
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` when the key is absent.
    pub fn gemini_api_key(&self) -> Result<&SecretString, ApplicationError> {
        self.gemini_api_key
            .as_ref()
            .ok_or_else(|| ApplicationError::MissingCredential(GEMINI_API_KEY_VAR.to_string()))
    }
}

/// User-facing text for an absent key
pub fn missing_key_message(var: &str) -> String {
    let provider = match var {
        OPENWEATHER_API_KEY_VAR => "OpenWeatherMap",
        GEMINI_API_KEY_VAR => "Gemini",
        other => other,
    };
    format!("⚠️ {provider} API key not found! Please check your .env file.")
}
