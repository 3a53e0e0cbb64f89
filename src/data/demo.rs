//! Demo data synthesis
//!
//! Placeholder weather used when the provider cannot be used, e.g. when the
//! API key is missing or rejected, and as a stand-in forecast when the real
//! forecast is unavailable. Values are random within fixed bounds; this is
//! filler for the screen, not a weather model.

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;

use super::view_model::visibility_km;
use super::{CurrentConditions, Forecast, ForecastEntry};

/// Country code shown for synthesized places
pub const DEMO_COUNTRY: &str = "Demo";

/// Descriptions used for demo conditions
pub const DEMO_DESCRIPTIONS: [&str; 4] = ["sunny", "cloudy", "partly cloudy", "clear"];

/// Icons used for demo conditions, drawn independently of the description
pub const DEMO_ICONS: [&str; 4] = ["01d", "02d", "03d", "04d"];

/// Description and icon of every placeholder forecast day
const PLACEHOLDER_DESCRIPTION: &str = "partly cloudy";
const PLACEHOLDER_ICON: &str = "02d";

/// Sunrise and sunset sit this many hours either side of now
const SUN_OFFSET_HOURS: i64 = 6;

/// Generates synthetic current conditions and forecasts
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoDataSynthesizer;

impl DemoDataSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Random current conditions for `place`
    ///
    /// | field       | range            |
    /// |-------------|------------------|
    /// | temperature | 18-32 °C         |
    /// | feels like  | 16-30 °C         |
    /// | humidity    | 40-79 %          |
    /// | pressure    | 1000-1049 hPa    |
    /// | wind        | 1.0-11.0 m/s     |
    /// | visibility  | 8000-19999 m     |
    /// | cloudiness  | 0-99 %           |
    pub fn current_conditions(&self, place: &str, now: DateTime<Utc>) -> CurrentConditions {
        let mut rng = rand::rng();
        let description = DEMO_DESCRIPTIONS[rng.random_range(0..DEMO_DESCRIPTIONS.len())];
        let icon = DEMO_ICONS[rng.random_range(0..DEMO_ICONS.len())];
        let wind_speed = (rng.random_range(1.0..=11.0_f64) * 10.0).round() / 10.0;

        CurrentConditions {
            place: place.to_string(),
            country: Some(DEMO_COUNTRY.to_string()),
            temperature: rng.random_range(18..=32),
            feels_like: rng.random_range(16..=30),
            humidity: rng.random_range(40..=79),
            wind_speed,
            pressure: rng.random_range(1000..=1049),
            description: description.to_string(),
            icon: icon.to_string(),
            visibility_km: Some(visibility_km(rng.random_range(8000..=19999))),
            cloudiness: Some(rng.random_range(0..=99)),
            sunrise: Some(now - Duration::hours(SUN_OFFSET_HOURS)),
            sunset: Some(now + Duration::hours(SUN_OFFSET_HOURS)),
        }
    }

    /// Placeholder forecast for the five days after `now`
    ///
    /// Day `i` (1-based) has high `18 + i` and low `12 + i`.
    pub fn placeholder_forecast(&self, now: DateTime<Utc>) -> Forecast {
        let entries: [ForecastEntry; 5] = std::array::from_fn(|index| {
            let day = index as i64 + 1;
            ForecastEntry {
                date: now + Duration::days(day),
                high: 18 + day as i32,
                low: 12 + day as i32,
                description: PLACEHOLDER_DESCRIPTION.to_string(),
                icon: PLACEHOLDER_ICON.to_string(),
            }
        });
        Forecast::from(entries)
    }
}
