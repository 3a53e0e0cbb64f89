//! Lookup orchestration
//!
//! Turns one user query into exactly one [`LookupOutcome`]. The chain is:
//! current conditions, then a best-effort forecast, with demo data standing
//! in when the provider rejects the credentials. Coordinates are first
//! resolved to a place name and then looked up like typed text.

use chrono::Utc;

use crate::cache::RecentSearchStore;
use crate::data::{
    build_current_conditions, build_forecast, DemoDataSynthesizer, ErrorKind, Forecast,
    LookupOutcome, ProviderError, Query, WeatherProvider,
};

/// Reason attached to demo outcomes
pub const DEMO_REASON: &str = "invalid or missing credentials";

pub const RATE_LIMITED_MESSAGE: &str = "API limit exceeded - Try again later";

pub const LOCATION_UNAVAILABLE_MESSAGE: &str = "Unable to get weather for your location";

/// Receives lookup progress and results
///
/// Implemented by the terminal UI and the plain-text printer.
pub trait Presenter {
    fn show_loading(&mut self);

    fn hide_loading(&mut self);

    /// Shows one outcome; each variant should look distinct
    fn present(&mut self, outcome: &LookupOutcome);

    /// Called after a successful lookup changed the recent searches
    fn show_recent_searches(&mut self, searches: &[String]);
}

/// A lookup as the user asked for it, before validation
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    /// Raw text from the search box; may be blank
    Text(String),
    Coordinates { latitude: f64, longitude: f64 },
}

/// Runs lookups against a provider and records successful ones
pub struct WeatherOrchestrator {
    provider: Box<dyn WeatherProvider>,
    store: Box<dyn RecentSearchStore + Send>,
    synthesizer: DemoDataSynthesizer,
    /// False when running without a usable API key
    credentials_valid: bool,
}

impl WeatherOrchestrator {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        store: Box<dyn RecentSearchStore + Send>,
        credentials_valid: bool,
    ) -> Self {
        Self {
            provider,
            store,
            synthesizer: DemoDataSynthesizer::new(),
            credentials_valid,
        }
    }

    pub fn credentials_valid(&self) -> bool {
        self.credentials_valid
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.store.load()
    }

    pub fn last_query(&self) -> Option<String> {
        self.store.load_last_query()
    }

    /// Runs one lookup and reports it to `presenter`
    ///
    /// The presenter sees `show_loading`, then `present`, then (on success)
    /// `show_recent_searches`, then `hide_loading`.
    pub async fn run(
        &mut self,
        request: &LookupRequest,
        presenter: &mut dyn Presenter,
    ) -> LookupOutcome {
        presenter.show_loading();
        let outcome = self.lookup_request(request).await;
        presenter.present(&outcome);
        if outcome.is_success() {
            presenter.show_recent_searches(&self.store.load());
        }
        presenter.hide_loading();
        outcome
    }

    pub async fn lookup_request(&mut self, request: &LookupRequest) -> LookupOutcome {
        match request {
            LookupRequest::Text(text) => self.lookup_text(text).await,
            LookupRequest::Coordinates {
                latitude,
                longitude,
            } => self.lookup_coordinates(*latitude, *longitude).await,
        }
    }

    /// Looks up typed text; blank text fails without any request
    pub async fn lookup_text(&mut self, text: &str) -> LookupOutcome {
        match Query::place(text) {
            Ok(query) => self.lookup(&query).await,
            Err(err) => LookupOutcome::failure(ErrorKind::InvalidInput, err.to_string()),
        }
    }

    /// Looks up a position; out-of-range values fail without any request
    pub async fn lookup_coordinates(&mut self, latitude: f64, longitude: f64) -> LookupOutcome {
        match Query::coordinates(latitude, longitude) {
            Ok(query) => self.lookup(&query).await,
            Err(err) => LookupOutcome::failure(ErrorKind::InvalidInput, err.to_string()),
        }
    }

    pub async fn lookup(&mut self, query: &Query) -> LookupOutcome {
        match query {
            Query::Place(name) => self.lookup_place(query, name).await,
            Query::Coordinates {
                latitude,
                longitude,
            } => self.lookup_position(*latitude, *longitude).await,
        }
    }

    /// Resolves a position to a place name, then looks that name up
    async fn lookup_position(&mut self, latitude: f64, longitude: f64) -> LookupOutcome {
        tracing::info!(latitude, longitude, "resolving location");

        let resolved = match self.provider.resolve_place_name(latitude, longitude).await {
            Ok(document) => Query::place(&document.name).ok(),
            Err(err) => {
                tracing::warn!(error = %err, "location lookup failed");
                None
            }
        };

        match resolved {
            Some(query @ Query::Place(_)) => {
                let name = query.to_string();
                self.lookup_place(&query, &name).await
            }
            _ => LookupOutcome::failure(
                ErrorKind::LocationUnavailable,
                LOCATION_UNAVAILABLE_MESSAGE,
            ),
        }
    }

    async fn lookup_place(&mut self, query: &Query, place: &str) -> LookupOutcome {
        tracing::info!(place, "looking up weather");

        let document = match self.provider.fetch_current(query).await {
            Ok(document) => document,
            Err(err) => return self.classify_failure(place, err),
        };

        let conditions = match build_current_conditions(&document) {
            Ok(conditions) => conditions,
            Err(err) => {
                tracing::warn!(place, error = %err, "unusable current conditions");
                return service_unavailable("malformed response");
            }
        };

        let forecast = self.fetch_forecast(query).await;

        self.store.record(place);
        self.store.save_last_query(place);

        LookupOutcome::Success {
            conditions,
            forecast,
        }
    }

    /// Real forecast if possible, otherwise the placeholder; never fails
    async fn fetch_forecast(&self, query: &Query) -> Forecast {
        let result = match self.provider.fetch_forecast(query).await {
            Ok(document) => build_forecast(&document).map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };

        result.unwrap_or_else(|reason| {
            tracing::debug!(%reason, "forecast unavailable, using placeholder");
            self.synthesizer.placeholder_forecast(Utc::now())
        })
    }

    fn classify_failure(&self, place: &str, err: ProviderError) -> LookupOutcome {
        tracing::warn!(place, error = %err, "current conditions request failed");

        match err {
            ProviderError::Unauthorized => self.demo_fallback(place),
            ProviderError::NotFound if !self.credentials_valid => self.demo_fallback(place),
            ProviderError::NotFound => LookupOutcome::failure(
                ErrorKind::NotFound,
                format!(
                    "City \"{}\" not found. Try: \"London\", \"Paris\", \"New York\"",
                    place
                ),
            ),
            ProviderError::RateLimited => {
                LookupOutcome::failure(ErrorKind::RateLimited, RATE_LIMITED_MESSAGE)
            }
            ProviderError::Status(code) => service_unavailable(&code.to_string()),
            ProviderError::Transport(_) => service_unavailable("network error"),
            ProviderError::Malformed(_) => service_unavailable("malformed response"),
        }
    }

    fn demo_fallback(&self, place: &str) -> LookupOutcome {
        tracing::info!(place, "showing demo data");
        let now = Utc::now();
        LookupOutcome::DemoFallback {
            conditions: self.synthesizer.current_conditions(place, now),
            forecast: self.synthesizer.placeholder_forecast(now),
            reason: DEMO_REASON.to_string(),
        }
    }
}

fn service_unavailable(cause: &str) -> LookupOutcome {
    LookupOutcome::failure(
        ErrorKind::ServiceUnavailable,
        format!("Weather service unavailable (Error: {})", cause),
    )
}
