//! Domain layer for Mausam
//!
//! Contains the weather samples reported by the provider, the daily summary
//! built from them, and the forecast reduction that connects the two.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod forecast;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use forecast::{
    DayAggregate, noon, reduce, representative_sample, round_to_tenth, samples_on,
    target_date_after,
};
pub use value_objects::*;
