//! Core data models for WeatherFlow
//!
//! This module contains the types that flow between the provider client,
//! the view-model builder, the lookup orchestrator and the presenters.

pub mod demo;
pub mod provider;
pub mod view_model;

pub use demo::DemoDataSynthesizer;
pub use provider::{
    CurrentDocument, ForecastDocument, OpenWeatherClient, ProviderError, WeatherProvider,
};
pub use view_model::{build_current_conditions, build_forecast, ViewModelError};

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Number of days shown in a forecast
pub const FORECAST_DAYS: usize = 5;

/// Errors raised when a query cannot be constructed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The place name was empty or only whitespace
    #[error("Please enter a city name")]
    EmptyPlace,

    /// Latitude or longitude was out of range or not finite
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// What the user asked to look up
///
/// Only constructible through [`Query::place`] and [`Query::coordinates`],
/// which validate their input.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// A trimmed, non-empty place name such as "Paris" or "New York"
    Place(String),
    /// A position in decimal degrees
    Coordinates { latitude: f64, longitude: f64 },
}

impl Query {
    /// Creates a place query, trimming surrounding whitespace
    pub fn place(text: &str) -> Result<Self, QueryError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyPlace);
        }
        Ok(Query::Place(trimmed.to_string()))
    }

    /// Creates a coordinate query
    ///
    /// Both values must be finite, latitude within [-90, 90] and longitude
    /// within [-180, 180].
    pub fn coordinates(latitude: f64, longitude: f64) -> Result<Self, QueryError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(QueryError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Query::Coordinates {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Place(name) => f.write_str(name),
            Query::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{:.4}, {:.4}", latitude, longitude),
        }
    }
}

/// Current conditions ready for display
///
/// Temperatures are already rounded to whole degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Place name as reported by the provider
    pub place: String,
    /// Country or region code (e.g. "GB"), if reported
    pub country: Option<String>,
    /// Temperature in °C
    pub temperature: i32,
    /// Feels-like temperature in °C
    pub feels_like: i32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Short description, e.g. "light rain"
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
    /// Visibility in kilometres with one decimal
    pub visibility_km: Option<f64>,
    /// Cloud cover percentage
    pub cloudiness: Option<u8>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

impl CurrentConditions {
    /// Returns "Place, CC", or just the place when no country is known
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.place, country),
            None => self.place.clone(),
        }
    }
}

/// A single day in the forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Time of the sample this entry was taken from
    pub date: DateTime<Utc>,
    /// High temperature in °C
    pub high: i32,
    /// Low temperature in °C
    pub low: i32,
    pub description: String,
    pub icon: String,
}

/// Errors raised when assembling a forecast
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// The forecast did not have exactly one entry per day
    #[error("Forecast needs exactly {expected} days, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Exactly [`FORECAST_DAYS`] entries in chronological order
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast(Vec<ForecastEntry>);

impl Forecast {
    /// Creates a forecast, rejecting anything but a full set of days
    pub fn new(entries: Vec<ForecastEntry>) -> Result<Self, ForecastError> {
        if entries.len() != FORECAST_DAYS {
            return Err(ForecastError::WrongLength {
                expected: FORECAST_DAYS,
                actual: entries.len(),
            });
        }
        Ok(Self(entries))
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastEntry> {
        self.0.iter()
    }
}

impl From<[ForecastEntry; FORECAST_DAYS]> for Forecast {
    fn from(entries: [ForecastEntry; FORECAST_DAYS]) -> Self {
        Self(entries.into())
    }
}

/// Categories of lookup failure shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty city name or out-of-range coordinates; no request was made
    InvalidInput,
    NotFound,
    RateLimited,
    ServiceUnavailable,
    /// Coordinates could not be resolved to a place
    LocationUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::NotFound => "not found",
            ErrorKind::RateLimited => "rate limited",
            ErrorKind::ServiceUnavailable => "service unavailable",
            ErrorKind::LocationUnavailable => "location unavailable",
        };
        f.write_str(label)
    }
}

/// The single result of one lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Real data from the provider (the forecast may be a placeholder)
    Success {
        conditions: CurrentConditions,
        forecast: Forecast,
    },
    /// Synthetic data shown because the provider could not be used
    DemoFallback {
        conditions: CurrentConditions,
        forecast: Forecast,
        reason: String,
    },
    /// Nothing to show; `message` is user-facing
    Failure { kind: ErrorKind, message: String },
}

impl LookupOutcome {
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        LookupOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LookupOutcome::Failure { .. })
    }

    /// Returns the conditions for Success and DemoFallback outcomes
    pub fn conditions(&self) -> Option<&CurrentConditions> {
        match self {
            LookupOutcome::Success { conditions, .. }
            | LookupOutcome::DemoFallback { conditions, .. } => Some(conditions),
            LookupOutcome::Failure { .. } => None,
        }
    }

    /// Returns the forecast for Success and DemoFallback outcomes
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            LookupOutcome::Success { forecast, .. }
            | LookupOutcome::DemoFallback { forecast, .. } => Some(forecast),
            LookupOutcome::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(day: i64) -> ForecastEntry {
        ForecastEntry {
            date: Utc::now() + Duration::days(day),
            high: 20,
            low: 10,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn test_place_query_is_trimmed() {
        let query = Query::place("  Paris \t").unwrap();
        assert_eq!(query, Query::Place("Paris".to_string()));
        assert_eq!(query.to_string(), "Paris");
    }

    #[test]
    fn test_place_query_rejects_blank_input() {
        assert_eq!(Query::place(""), Err(QueryError::EmptyPlace));
        assert_eq!(Query::place("   "), Err(QueryError::EmptyPlace));
        assert_eq!(
            QueryError::EmptyPlace.to_string(),
            "Please enter a city name"
        );
    }

    #[test]
    fn test_coordinate_query_bounds() {
        assert!(Query::coordinates(90.0, 180.0).is_ok());
        assert!(Query::coordinates(-90.0, -180.0).is_ok());
        assert!(Query::coordinates(51.5074, -0.1278).is_ok());

        assert!(Query::coordinates(90.1, 0.0).is_err());
        assert!(Query::coordinates(0.0, -180.5).is_err());
        assert!(Query::coordinates(f64::NAN, 0.0).is_err());
        assert!(Query::coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_forecast_requires_exactly_five_entries() {
        let four: Vec<ForecastEntry> = (1..=4).map(entry).collect();
        assert_eq!(
            Forecast::new(four),
            Err(ForecastError::WrongLength {
                expected: 5,
                actual: 4
            })
        );

        let six: Vec<ForecastEntry> = (1..=6).map(entry).collect();
        assert!(Forecast::new(six).is_err());

        let five: Vec<ForecastEntry> = (1..=5).map(entry).collect();
        let forecast = Forecast::new(five).unwrap();
        assert_eq!(forecast.entries().len(), FORECAST_DAYS);
    }

    #[test]
    fn test_display_name_with_and_without_country() {
        let mut conditions = CurrentConditions {
            place: "London".to_string(),
            country: Some("GB".to_string()),
            temperature: 12,
            feels_like: 10,
            humidity: 80,
            wind_speed: 4.1,
            pressure: 1012,
            description: "light rain".to_string(),
            icon: "10d".to_string(),
            visibility_km: None,
            cloudiness: None,
            sunrise: None,
            sunset: None,
        };
        assert_eq!(conditions.display_name(), "London, GB");

        conditions.country = None;
        assert_eq!(conditions.display_name(), "London");
    }

    #[test]
    fn test_failure_outcome_has_no_view_data() {
        let outcome = LookupOutcome::failure(ErrorKind::RateLimited, "slow down");
        assert!(outcome.is_failure());
        assert!(!outcome.is_success());
        assert!(outcome.conditions().is_none());
        assert!(outcome.forecast().is_none());
    }
}
