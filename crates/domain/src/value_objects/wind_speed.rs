//! Wind speed value object
//!
//! The provider omits the wind block for some slots. That absence is kept
//! distinct from a calm reading so it is never shown as "0 m/s".
//!
//! # Examples
//!
//! ```
//! use domain::WindSpeed;
//!
//! assert_eq!(WindSpeed::from(Some(3.5)).to_string(), "3.5 m/s");
//! assert_eq!(WindSpeed::from(None).to_string(), "not available");
//! assert_eq!(WindSpeed::Measured(0.0).to_string(), "0 m/s");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wind speed in metres per second, or an explicit "unavailable" marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum WindSpeed {
    /// A reading in m/s
    Measured(f64),
    /// The provider did not report wind for this slot
    Unavailable,
}

impl WindSpeed {
    /// Text shown in place of a reading when wind is unavailable
    pub const NOT_AVAILABLE: &'static str = "not available";

    /// The reading in m/s, if any
    #[must_use]
    pub const fn meters_per_second(self) -> Option<f64> {
        match self {
            Self::Measured(speed) => Some(speed),
            Self::Unavailable => None,
        }
    }

    /// Whether a reading is present
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

impl From<Option<f64>> for WindSpeed {
    fn from(speed: Option<f64>) -> Self {
        match speed {
            Some(speed) if speed.is_finite() => Self::Measured(speed),
            _ => Self::Unavailable,
        }
    }
}

impl From<WindSpeed> for Option<f64> {
    fn from(speed: WindSpeed) -> Self {
        speed.meters_per_second()
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured(speed) => write!(f, "{speed} m/s"),
            Self::Unavailable => f.write_str(Self::NOT_AVAILABLE),
        }
    }
}
