//! OpenWeather API client
//!
//! Defines the `WeatherProvider` boundary the orchestrator talks to, the
//! response documents it returns, and a reqwest client for the OpenWeather
//! `data/2.5` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::Query;

/// Base URL for the OpenWeather API
const OPEN_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Requests taking longer than this fail with a transport error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when calling the weather provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The API key was missing or rejected (HTTP 401)
    #[error("unauthorized")]
    Unauthorized,

    /// No such place (HTTP 404)
    #[error("not found")]
    NotFound,

    /// Too many requests (HTTP 429)
    #[error("rate limited")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(String),

    /// The response body did not match the expected document
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Current-conditions document (`/weather`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDocument {
    pub name: String,
    #[serde(default)]
    pub sys: Option<SysInfo>,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherSummary>,
    #[serde(default)]
    pub wind: Wind,
    /// Visibility in metres
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
}

/// Country and sun times; all fields are optional in practice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub sunrise: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

/// 5-day / 3-hour forecast document (`/forecast`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDocument {
    /// Samples in chronological order, 8 per day
    pub list: Vec<ForecastSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Unix seconds
    pub dt: i64,
    pub main: ForecastReadings,
    #[serde(default)]
    pub weather: Vec<WeatherSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReadings {
    pub temp_min: f64,
    pub temp_max: f64,
}

/// A source of weather documents
///
/// Query encoding, authentication and timeouts are the implementor's
/// concern; callers only see documents or a [`ProviderError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current conditions for a place or position
    async fn fetch_current(&self, query: &Query) -> Result<CurrentDocument, ProviderError>;

    /// Fetches the 3-hourly forecast for a place or position
    async fn fetch_forecast(&self, query: &Query) -> Result<ForecastDocument, ProviderError>;

    /// Looks up the place at a position; the document's `name` is the result
    async fn resolve_place_name(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentDocument, ProviderError>;
}

/// Client for fetching weather data from the OpenWeather API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a new client with the given API key
    ///
    /// An empty key is allowed; the API will answer 401, which the
    /// orchestrator turns into demo data.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: OPEN_WEATHER_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends a GET to `endpoint` and decodes the body as `T`
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(endpoint, status = status.as_u16(), "provider responded");
        classify_status(status)?;

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, query: &Query) -> Result<CurrentDocument, ProviderError> {
        self.get("weather", &query_params(query)).await
    }

    async fn fetch_forecast(&self, query: &Query) -> Result<ForecastDocument, ProviderError> {
        self.get("forecast", &query_params(query)).await
    }

    async fn resolve_place_name(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentDocument, ProviderError> {
        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];
        self.get("weather", &params).await
    }
}

/// Builds the location parameters for a query
fn query_params(query: &Query) -> Vec<(&'static str, String)> {
    match query {
        Query::Place(name) => vec![("q", name.clone())],
        Query::Coordinates {
            latitude,
            longitude,
        } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
    }
}

/// Maps an HTTP status to `Ok` or the matching [`ProviderError`]
pub fn classify_status(status: StatusCode) -> Result<(), ProviderError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(ProviderError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ProviderError::NotFound),
        StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
        other => Err(ProviderError::Status(other.as_u16())),
    }
}
