//! Display formatting shared by the terminal and plain-text presenters
//!
//! Dates use en-US conventions ("Friday, October 16, 2026 at 02:30 PM").

use chrono::{DateTime, Local, TimeZone};
use ratatui::style::Color;

/// Visibility at or above this many km fills the visibility meter
pub const FULL_VISIBILITY_KM: f64 = 20.0;

/// "Friday, October 16, 2026 at 02:30 PM"
pub fn format_full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%A, %B %-d, %Y at %I:%M %p").to_string()
}

/// "Sat, Oct 17"
pub fn format_day<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%a, %b %-d").to_string()
}

/// "06:12 AM"
pub fn format_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%I:%M %p").to_string()
}

/// Converts a UTC timestamp to the local zone for display
pub fn to_local(date: &DateTime<chrono::Utc>) -> DateTime<Local> {
    date.with_timezone(&Local)
}

/// "22°C"
pub fn format_temperature(degrees: i32) -> String {
    format!("{}°C", degrees)
}

/// Percentage of the visibility meter to fill
pub fn visibility_fill(visibility_km: f64) -> f64 {
    (visibility_km / FULL_VISIBILITY_KM * 100.0).clamp(0.0, 100.0)
}

/// Maps an OpenWeather icon code ("10d") to a terminal glyph
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "\u{2600}",  // ☀
        Some("02") => "\u{26C5}",  // ⛅
        Some("03") | Some("04") => "\u{2601}", // ☁
        Some("09") => "\u{1F327}", // 🌧
        Some("10") => "\u{1F326}", // 🌦
        Some("11") => "\u{26C8}",  // ⛈
        Some("13") => "\u{2744}",  // ❄
        Some("50") => "\u{1F32B}", // 🌫
        _ => "?",
    }
}

/// Color for temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(degrees: i32) -> Color {
    if degrees >= 30 {
        Color::Red
    } else if degrees >= 25 {
        Color::LightRed
    } else if degrees >= 20 {
        Color::Yellow
    } else if degrees >= 15 {
        Color::Green
    } else if degrees >= 10 {
        Color::Cyan
    } else {
        Color::Blue
    }
}
