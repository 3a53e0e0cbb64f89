//! View-model building
//!
//! Pure functions that turn provider documents into the display types in
//! [`crate::data`]. Temperatures are rounded here so every presenter shows
//! the same numbers.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::provider::{CurrentDocument, ForecastDocument, ForecastSample};
use super::{CurrentConditions, Forecast, ForecastEntry, ForecastError, FORECAST_DAYS};

/// The forecast endpoint reports every 3 hours
pub const SAMPLES_PER_DAY: usize = 8;

/// Errors that can occur while building view models
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewModelError {
    /// Missing expected field in the document
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Timestamp outside the representable range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Rounds a temperature to whole degrees, halves rounding up (21.5 -> 22, -2.5 -> -2)
pub fn round_temperature(raw: f64) -> i32 {
    (raw + 0.5).floor() as i32
}

/// Converts metres to kilometres with one decimal place
pub fn visibility_km(metres: u32) -> f64 {
    (f64::from(metres) / 100.0).round() / 10.0
}

/// Build current conditions from a `/weather` document
///
/// Visibility, clouds, country and sun times are optional and are left out
/// when absent. The first `weather` entry is required.
pub fn build_current_conditions(
    document: &CurrentDocument,
) -> Result<CurrentConditions, ViewModelError> {
    let summary = document
        .weather
        .first()
        .ok_or_else(|| ViewModelError::MissingField("weather".to_string()))?;

    let sys = document.sys.as_ref();

    Ok(CurrentConditions {
        place: document.name.clone(),
        country: sys
            .and_then(|s| s.country.clone())
            .filter(|country| !country.is_empty()),
        temperature: round_temperature(document.main.temp),
        feels_like: round_temperature(document.main.feels_like),
        humidity: document.main.humidity,
        wind_speed: document.wind.speed,
        pressure: document.main.pressure,
        description: summary.description.clone(),
        icon: summary.icon.clone(),
        visibility_km: document.visibility.map(visibility_km),
        cloudiness: document.clouds.as_ref().map(|clouds| clouds.all),
        sunrise: sys
            .and_then(|s| s.sunrise)
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        sunset: sys
            .and_then(|s| s.sunset)
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
    })
}

/// Build a five-day forecast from a `/forecast` document
///
/// Keeps the 1st, 9th, 17th, ... sample: one fixed time of day per day,
/// not a daily min/max. Fails if fewer than five days can be sampled.
pub fn build_forecast(document: &ForecastDocument) -> Result<Forecast, ViewModelError> {
    let entries = document
        .list
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(FORECAST_DAYS)
        .map(build_forecast_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Forecast::new(entries)?)
}

fn build_forecast_entry(sample: &ForecastSample) -> Result<ForecastEntry, ViewModelError> {
    let summary = sample
        .weather
        .first()
        .ok_or_else(|| ViewModelError::MissingField("list.weather".to_string()))?;

    let date: DateTime<Utc> = DateTime::from_timestamp(sample.dt, 0)
        .ok_or(ViewModelError::InvalidTimestamp(sample.dt))?;

    Ok(ForecastEntry {
        date,
        high: round_temperature(sample.main.temp_max),
        low: round_temperature(sample.main.temp_min),
        description: summary.description.clone(),
        icon: summary.icon.clone(),
    })
}
