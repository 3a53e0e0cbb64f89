//! Plain-text rendering of lookup outcomes for `--once` mode

use chrono::{DateTime, Local};

use crate::data::{CurrentConditions, Forecast, LookupOutcome};
use crate::orchestrator::Presenter;
use crate::ui::format::{
    format_day, format_full_date, format_temperature, format_time, icon_glyph, to_local,
};
use crate::ui::overlays::{DEMO_NOTICE, ERROR_TITLE};

/// Renders one outcome as printable text
pub fn render_outcome(outcome: &LookupOutcome, now: DateTime<Local>) -> String {
    match outcome {
        LookupOutcome::Success {
            conditions,
            forecast,
        } => render_weather(conditions, forecast, now),
        LookupOutcome::DemoFallback {
            conditions,
            forecast,
            ..
        } => {
            let mut out = render_weather(conditions, forecast, now);
            out.push('\n');
            out.push_str(DEMO_NOTICE);
            out.push('\n');
            out
        }
        LookupOutcome::Failure { message, .. } => format!("{}: {}\n", ERROR_TITLE, message),
    }
}

fn render_weather(
    conditions: &CurrentConditions,
    forecast: &Forecast,
    now: DateTime<Local>,
) -> String {
    let mut lines = vec![
        conditions.display_name(),
        format_full_date(&now),
        format!(
            "{} {}  {} (feels like {})",
            icon_glyph(&conditions.icon),
            format_temperature(conditions.temperature),
            conditions.description,
            format_temperature(conditions.feels_like),
        ),
        format!(
            "Humidity {}%  Wind {:.1} m/s  Pressure {} hPa",
            conditions.humidity, conditions.wind_speed, conditions.pressure
        ),
    ];

    let mut extras = Vec::new();
    if let Some(km) = conditions.visibility_km {
        extras.push(format!("Visibility {:.1} km", km));
    }
    if let Some(clouds) = conditions.cloudiness {
        extras.push(format!("Clouds {}%", clouds));
    }
    if !extras.is_empty() {
        lines.push(extras.join("  "));
    }
    if let (Some(sunrise), Some(sunset)) = (conditions.sunrise, conditions.sunset) {
        lines.push(format!(
            "Sunrise {}  Sunset {}",
            format_time(&to_local(&sunrise)),
            format_time(&to_local(&sunset))
        ));
    }

    lines.push(String::new());
    lines.extend(forecast.iter().map(|entry| {
        format!(
            "{:<12}{} {:>5} / {:<5} {}",
            format_day(&to_local(&entry.date)),
            icon_glyph(&entry.icon),
            format_temperature(entry.high),
            format_temperature(entry.low),
            entry.description,
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Collects the rendered outcome for printing once the lookup finishes
#[derive(Debug, Default)]
pub struct TextPresenter {
    pub output: String,
    /// Set when the presented outcome was a failure
    pub failed: bool,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for TextPresenter {
    fn show_loading(&mut self) {
        tracing::debug!("lookup started");
    }

    fn hide_loading(&mut self) {
        tracing::debug!("lookup finished");
    }

    fn present(&mut self, outcome: &LookupOutcome) {
        self.failed = outcome.is_failure();
        self.output = render_outcome(outcome, Local::now());
    }

    fn show_recent_searches(&mut self, searches: &[String]) {
        tracing::debug!(count = searches.len(), "recent searches updated");
    }
}
