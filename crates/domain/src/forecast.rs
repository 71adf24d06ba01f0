//! Forecast reduction
//!
//! Turns the provider's list of 3-hour samples into a [`DailySummary`] for a
//! single date. The whole-day aggregate and the representative-sample choice
//! are separate passes over the same filtered slice.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use domain::{Humidity, RainProbability, WeatherSample, WindSpeed, noon, reduce};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 11, 6).unwrap();
//! let sample = |hour, temperature| WeatherSample {
//!     timestamp: day.and_hms_opt(hour, 0, 0).unwrap(),
//!     temperature,
//!     humidity: Humidity::new(70).unwrap(),
//!     rain_probability: RainProbability::NONE,
//!     description: "clear sky".to_string(),
//!     wind_speed: WindSpeed::Measured(2.0),
//!     pressure: 1010,
//! };
//!
//! let samples = vec![sample(9, 27.0), sample(12, 31.0), sample(15, 30.0)];
//! let summary = reduce("Mumbai", &samples, day, noon()).unwrap();
//! assert_eq!(summary.temperature_max, 31.0);
//! assert_eq!(summary.temperature_min, 27.0);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::entities::{DailySummary, WeatherSample};
use crate::errors::DomainError;

/// Time-of-day anchor used to pick the representative sample
#[must_use]
pub fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

/// The date after `now`'s UTC calendar date
#[must_use]
pub fn target_date_after(now: DateTime<Utc>) -> NaiveDate {
    let today = now.date_naive();
    today.succ_opt().unwrap_or(today)
}

/// Round to one decimal place, exact halves to even
///
/// `24.25` becomes `24.2` and `24.75` becomes `24.8`.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Samples whose date equals `date`, in input order
#[must_use]
pub fn samples_on(samples: &[WeatherSample], date: NaiveDate) -> Vec<&WeatherSample> {
    samples.iter().filter(|s| s.date() == date).collect()
}

/// Whole-day figures computed over every sample of a date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayAggregate {
    /// Maximum temperature, one decimal
    pub temperature_max: f64,
    /// Minimum temperature, one decimal
    pub temperature_min: f64,
    /// Mean rain probability as a percentage, one decimal
    pub rain_probability_avg_percent: f64,
}

impl DayAggregate {
    /// Aggregate a day's samples; `None` when the slice is empty
    #[must_use]
    pub fn from_samples(samples: &[&WeatherSample]) -> Option<Self> {
        let first = samples.first()?;

        let (max, min, rain_sum) = samples.iter().fold(
            (first.temperature, first.temperature, 0.0),
            |(max, min, rain), s| {
                (
                    max.max(s.temperature),
                    min.min(s.temperature),
                    rain + s.rain_probability.value(),
                )
            },
        );

        #[allow(clippy::cast_precision_loss)]
        let rain_mean = rain_sum / samples.len() as f64;

        Some(Self {
            temperature_max: round_to_tenth(max),
            temperature_min: round_to_tenth(min),
            rain_probability_avg_percent: round_to_tenth(rain_mean * 100.0),
        })
    }
}

/// The sample closest in time to `anchor`
///
/// Equidistant candidates resolve to the earliest one in slice order.
#[must_use]
pub fn representative_sample<'a>(
    samples: &[&'a WeatherSample],
    anchor: NaiveDateTime,
) -> Option<&'a WeatherSample> {
    samples
        .iter()
        .copied()
        .min_by_key(|s| (s.timestamp - anchor).abs())
}

/// Reduce a city's samples to the summary for `target_date`
///
/// `reference_time` is combined with `target_date` to form the anchor for the
/// representative sample; callers pass [`noon`].
///
/// # Errors
///
/// Returns `DomainError::NoForecastForDate` when no sample falls on
/// `target_date`.
pub fn reduce(
    city: &str,
    samples: &[WeatherSample],
    target_date: NaiveDate,
    reference_time: NaiveTime,
) -> Result<DailySummary, DomainError> {
    let day = samples_on(samples, target_date);

    let aggregate =
        DayAggregate::from_samples(&day).ok_or(DomainError::NoForecastForDate(target_date))?;
    let representative = representative_sample(&day, target_date.and_time(reference_time))
        .ok_or(DomainError::NoForecastForDate(target_date))?;

    Ok(DailySummary {
        city: city.to_string(),
        target_date,
        representative_timestamp: representative.timestamp,
        temperature_max: aggregate.temperature_max,
        temperature_min: aggregate.temperature_min,
        humidity: representative.humidity,
        description: representative.description.clone(),
        wind_speed: representative.wind_speed,
        pressure: representative.pressure,
        rain_probability_avg_percent: aggregate.rain_probability_avg_percent,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::value_objects::{Humidity, RainProbability, WindSpeed};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn sample(day: u32, hour: u32, temperature: f64, rain: f64) -> WeatherSample {
        WeatherSample {
            timestamp: date(day).and_hms_opt(hour, 0, 0).unwrap(),
            temperature,
            humidity: Humidity::new(60).unwrap(),
            rain_probability: RainProbability::new(rain).unwrap(),
            description: format!("slot {hour}"),
            wind_speed: WindSpeed::Measured(1.0),
            pressure: 1000 + hour,
        }
    }

    /// Scenario from a recorded Mumbai forecast
    fn mumbai_day(wind: WindSpeed) -> Vec<WeatherSample> {
        let mut noon_sample = sample(6, 12, 32.5, 0.2);
        noon_sample.humidity = Humidity::new(75).unwrap();
        noon_sample.description = "clear sky".to_string();
        noon_sample.wind_speed = wind;
        noon_sample.pressure = 1012;

        vec![
            sample(5, 21, 26.0, 0.9),
            sample(6, 6, 24.1, 0.0),
            sample(6, 9, 28.3, 0.1),
            noon_sample,
            sample(7, 0, 23.0, 0.5),
        ]
    }

    #[test]
    fn reduces_recorded_scenario() {
        let samples = mumbai_day(WindSpeed::Measured(3.5));
        let summary = reduce("Mumbai", &samples, date(6), noon()).unwrap();

        assert_eq!(summary.city, "Mumbai");
        assert_eq!(summary.target_date, date(6));
        assert!((summary.temperature_max - 32.5).abs() < f64::EPSILON);
        assert!((summary.temperature_min - 24.1).abs() < f64::EPSILON);
        assert!((summary.rain_probability_avg_percent - 10.0).abs() < f64::EPSILON);
        assert_eq!(summary.humidity.value(), 75);
        assert_eq!(summary.description, "clear sky");
        assert_eq!(summary.wind_speed, WindSpeed::Measured(3.5));
        assert_eq!(summary.pressure, 1012);
        assert_eq!(summary.forecast_time(), "2025-11-06 12:00:00");
    }

    #[test]
    fn missing_wind_stays_unavailable() {
        let samples = mumbai_day(WindSpeed::Unavailable);
        let summary = reduce("Mumbai", &samples, date(6), noon()).unwrap();

        assert_eq!(summary.wind_speed, WindSpeed::Unavailable);
        assert_eq!(summary.wind_speed.to_string(), "not available");
    }

    #[test]
    fn no_sample_on_date_is_not_found() {
        let samples = mumbai_day(WindSpeed::Measured(3.5));
        let err = reduce("Mumbai", &samples, date(20), noon()).unwrap_err();
        assert!(matches!(err, DomainError::NoForecastForDate(d) if d == date(20)));
    }

    #[test]
    fn empty_input_is_not_found() {
        assert!(reduce("Mumbai", &[], date(6), noon()).is_err());
    }

    #[test]
    fn aggregate_covers_whole_day_not_representative() {
        let samples = vec![
            sample(6, 0, 21.04, 0.0),
            sample(6, 12, 30.0, 0.0),
            sample(6, 21, 34.96, 1.0),
        ];
        let day = samples_on(&samples, date(6));
        let aggregate = DayAggregate::from_samples(&day).unwrap();

        assert!((aggregate.temperature_max - 35.0).abs() < f64::EPSILON);
        assert!((aggregate.temperature_min - 21.0).abs() < f64::EPSILON);
        assert!((aggregate.rain_probability_avg_percent - 33.3).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_of_nothing_is_none() {
        assert!(DayAggregate::from_samples(&[]).is_none());
    }

    #[test]
    fn representative_is_nearest_to_anchor() {
        let samples = vec![sample(6, 3, 20.0, 0.0), sample(6, 15, 30.0, 0.0)];
        let day = samples_on(&samples, date(6));
        let anchor = date(6).and_hms_opt(13, 0, 0).unwrap();

        let chosen = representative_sample(&day, anchor).unwrap();
        assert_eq!(chosen.timestamp.format("%H").to_string(), "15");
    }

    #[test]
    fn representative_tie_prefers_earlier_sample() {
        let samples = vec![sample(6, 9, 20.0, 0.0), sample(6, 15, 30.0, 0.0)];
        let day = samples_on(&samples, date(6));

        let chosen = representative_sample(&day, date(6).and_time(noon())).unwrap();
        assert_eq!(chosen.description, "slot 9");
    }

    #[test]
    fn representative_fields_are_not_aggregated() {
        let mut samples = vec![sample(6, 0, 20.0, 0.0), sample(6, 12, 30.0, 0.0)];
        samples[0].humidity = Humidity::new(99).unwrap();
        samples[0].pressure = 990;

        let summary = reduce("Pune", &samples, date(6), noon()).unwrap();
        assert_eq!(summary.humidity.value(), 60);
        assert_eq!(summary.pressure, 1012);
    }

    #[test]
    fn round_to_tenth_behaviour() {
        assert!((round_to_tenth(24.14) - 24.1).abs() < f64::EPSILON);
        assert!((round_to_tenth(24.16) - 24.2).abs() < f64::EPSILON);
        assert!((round_to_tenth(-3.26) + 3.3).abs() < f64::EPSILON);
        assert!((round_to_tenth(10.000_000_000_000_002) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn round_to_tenth_sends_halves_to_even() {
        assert!((round_to_tenth(24.25) - 24.2).abs() < f64::EPSILON);
        assert!((round_to_tenth(24.75) - 24.8).abs() < f64::EPSILON);
        assert!((round_to_tenth(6.25) - 6.2).abs() < f64::EPSILON);
        assert!((round_to_tenth(-0.25) + 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_rounds_exact_halves_to_even() {
        let mut samples: Vec<WeatherSample> =
            (0..8).map(|slot| sample(6, slot * 3, 20.0, 0.0)).collect();
        samples[0].temperature = 24.25;
        samples[0].rain_probability = RainProbability::new(0.25).unwrap();
        samples[1].rain_probability = RainProbability::new(0.25).unwrap();

        let day = samples_on(&samples, date(6));
        let aggregate = DayAggregate::from_samples(&day).unwrap();

        assert!((aggregate.temperature_max - 24.2).abs() < f64::EPSILON);
        assert!((aggregate.rain_probability_avg_percent - 6.2).abs() < f64::EPSILON);
    }

    #[test]
    fn target_date_is_next_utc_day() {
        let now = Utc.with_ymd_and_hms(2025, 11, 5, 23, 59, 0).unwrap();
        assert_eq!(target_date_after(now), date(6));

        let month_end = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(
            target_date_after(month_end),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn noon_is_twelve_o_clock() {
        assert_eq!(noon().format("%H:%M:%S").to_string(), "12:00:00");
    }
}
