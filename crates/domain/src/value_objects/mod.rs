//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod humidity;
mod rain_probability;
mod wind_speed;

pub use city_name::CityName;
pub use humidity::{Humidity, InvalidHumidity};
pub use rain_probability::{InvalidRainProbability, RainProbability};
pub use wind_speed::WindSpeed;
