//! Command-line interface parsing for WeatherFlow
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a `StartupConfig`: what to look up first, where "my location" is,
//! and whether real credentials are available.

use clap::Parser;
use thiserror::Error;

use crate::data::{Query, QueryError};
use crate::orchestrator::LookupRequest;

/// Placeholder key that means "no real credentials"
pub const DEMO_API_KEY: &str = "demo";

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The --lat/--lon pair is out of range
    #[error(transparent)]
    InvalidLocation(#[from] QueryError),

    /// --once was given with nothing to look up
    #[error("Nothing to look up: pass --city or --lat/--lon")]
    NothingToLookUp,
}

/// WeatherFlow - Current weather and a five-day forecast
#[derive(Parser, Debug, Default)]
#[command(name = "weatherflow")]
#[command(about = "Current weather and a five-day forecast for any city")]
#[command(version)]
pub struct Cli {
    /// City to look up on startup
    ///
    /// Examples:
    ///   weatherflow --city Paris
    ///   weatherflow --city "New York" --once
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// Latitude of your location, used by Ctrl+L (requires --lon)
    #[arg(long, value_name = "LAT", allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude of your location, used by Ctrl+L (requires --lat)
    #[arg(long, value_name = "LON", allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// OpenWeather API key
    #[arg(long, value_name = "KEY", env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Run without real credentials and show sample data
    #[arg(long)]
    pub demo: bool,

    /// Print a single lookup as plain text and exit
    #[arg(long)]
    pub once: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupConfig {
    /// Lookup to run as soon as the app starts
    pub initial_lookup: Option<LookupRequest>,
    /// Validated --lat/--lon pair
    pub location: Option<(f64, f64)>,
    /// Key passed to the provider; empty when none was given and
    /// [`DEMO_API_KEY`] under `--demo`
    pub api_key: String,
    /// Whether `api_key` is believed to be a real key
    pub credentials_valid: bool,
    /// Plain-text single lookup instead of the TUI
    pub once: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// `--city` wins over `--lat/--lon` as the first lookup. Credentials are
    /// considered valid unless `--demo` is set or the key is missing, blank,
    /// or the literal `demo`. `--demo` also replaces any given key with
    /// [`DEMO_API_KEY`] so a real key is never sent.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let location = match (cli.lat, cli.lon) {
            (Some(latitude), Some(longitude)) => {
                Query::coordinates(latitude, longitude)?;
                Some((latitude, longitude))
            }
            _ => None,
        };

        let initial_lookup = match (&cli.city, location) {
            (Some(city), _) => Some(LookupRequest::Text(city.clone())),
            (None, Some((latitude, longitude))) => Some(LookupRequest::Coordinates {
                latitude,
                longitude,
            }),
            (None, None) => None,
        };

        let api_key = if cli.demo {
            DEMO_API_KEY.to_string()
        } else {
            cli.api_key
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };
        let credentials_valid = !api_key.is_empty() && api_key != DEMO_API_KEY;

        Ok(StartupConfig {
            initial_lookup,
            location,
            api_key,
            credentials_valid,
            once: cli.once,
        })
    }

    /// First lookup to run: the CLI query, else the saved `last_query`
    ///
    /// `None` means start on the welcome view.
    pub fn startup_lookup(&self, last_query: Option<String>) -> Option<LookupRequest> {
        self.initial_lookup
            .clone()
            .or_else(|| last_query.map(LookupRequest::Text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_key(key: Option<&str>) -> Cli {
        Cli {
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["weatherflow"]);
        assert!(cli.city.is_none());
        assert!(cli.lat.is_none());
        assert!(!cli.once);
        assert!(!cli.demo);
    }

    #[test]
    fn test_cli_parse_city_and_once() {
        let cli = Cli::parse_from(["weatherflow", "--city", "New York", "--once"]);
        assert_eq!(cli.city.as_deref(), Some("New York"));
        assert!(cli.once);
    }

    #[test]
    fn test_cli_parse_negative_coordinates() {
        let cli = Cli::parse_from(["weatherflow", "--lat", "-33.87", "--lon", "-151.21"]);
        assert_eq!(cli.lat, Some(-33.87));
        assert_eq!(cli.lon, Some(-151.21));
    }

    #[test]
    fn test_cli_lat_requires_lon() {
        let result = Cli::try_parse_from(["weatherflow", "--lat", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert!(config.initial_lookup.is_none());
        assert!(config.location.is_none());
        assert!(!config.credentials_valid);
        assert!(!config.once);
    }

    #[test]
    fn test_startup_config_city_is_first_lookup() {
        let cli = Cli {
            city: Some("Paris".to_string()),
            lat: Some(45.76),
            lon: Some(4.84),
            ..Default::default()
        };
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(
            config.initial_lookup,
            Some(LookupRequest::Text("Paris".to_string()))
        );
        assert_eq!(config.location, Some((45.76, 4.84)));
    }

    #[test]
    fn test_startup_config_coordinates_are_first_lookup_without_city() {
        let cli = Cli {
            lat: Some(45.76),
            lon: Some(4.84),
            ..Default::default()
        };
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(
            config.initial_lookup,
            Some(LookupRequest::Coordinates {
                latitude: 45.76,
                longitude: 4.84
            })
        );
    }

    #[test]
    fn test_startup_config_rejects_out_of_range_location() {
        let cli = Cli {
            lat: Some(95.0),
            lon: Some(0.0),
            ..Default::default()
        };
        let result = StartupConfig::from_cli(&cli);

        assert!(matches!(result, Err(CliError::InvalidLocation(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid coordinates"));
    }

    #[test]
    fn test_credentials_valid_with_real_key() {
        let config = StartupConfig::from_cli(&cli_with_key(Some("0123abcd"))).unwrap();
        assert!(config.credentials_valid);
        assert_eq!(config.api_key, "0123abcd");
    }

    #[test]
    fn test_credentials_invalid_without_key_or_with_placeholder() {
        for key in [None, Some(""), Some("   "), Some("demo")] {
            let config = StartupConfig::from_cli(&cli_with_key(key)).unwrap();
            assert!(!config.credentials_valid, "key {:?}", key);
        }
    }

    #[test]
    fn test_demo_flag_overrides_real_key() {
        let cli = Cli {
            api_key: Some("0123abcd".to_string()),
            demo: true,
            ..Default::default()
        };
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(!config.credentials_valid);
        assert_eq!(config.api_key, DEMO_API_KEY);
    }

    #[test]
    fn test_startup_lookup_prefers_cli_query() {
        let cli = Cli {
            city: Some("Oslo".to_string()),
            ..Default::default()
        };
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(
            config.startup_lookup(Some("Lima".to_string())),
            Some(LookupRequest::Text("Oslo".to_string()))
        );
    }

    #[test]
    fn test_startup_lookup_reloads_last_query() {
        let config = StartupConfig::default();
        assert_eq!(
            config.startup_lookup(Some("Lima".to_string())),
            Some(LookupRequest::Text("Lima".to_string()))
        );
    }

    #[test]
    fn test_startup_lookup_none_shows_welcome() {
        let config = StartupConfig::default();
        assert!(config.startup_lookup(None).is_none());
    }
}
