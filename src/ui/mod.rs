//! UI rendering module for WeatherFlow
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components, plus the plain-text printer
//! used by `--once`.

pub mod format;
pub mod help_overlay;
pub mod overlays;
pub mod search_bar;
pub mod text;
pub mod weather_view;
pub mod widgets;

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub use text::{render_outcome, TextPresenter};

/// Draws one frame of the application
pub fn render(frame: &mut Frame, app: &App) {
    render_at(frame, app, Local::now());
}

/// Draws one frame with the header clock fixed at `now`
pub fn render_at(frame: &mut Frame, app: &App, now: DateTime<Local>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(frame.area());

    search_bar::render(frame, app, chunks[0]);
    weather_view::render(frame, app, chunks[1], now);

    if app.notice.is_some() {
        overlays::render_demo_notice(frame, chunks[1]);
    }
    search_bar::render_suggestions(frame, app, chunks[0]);

    if app.loading {
        overlays::render_loading(frame);
    } else if let Some(message) = &app.error {
        overlays::render_error(frame, message);
    }

    if app.show_help {
        help_overlay::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DemoDataSynthesizer, ErrorKind, LookupOutcome};
    use crate::orchestrator::{LookupRequest, Presenter};
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(110, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        terminal.draw(|frame| render_at(frame, app, now)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn demo_outcome() -> LookupOutcome {
        let synthesizer = DemoDataSynthesizer::new();
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        LookupOutcome::DemoFallback {
            conditions: synthesizer.current_conditions("Nairobi", at),
            forecast: synthesizer.placeholder_forecast(at),
            reason: "invalid or missing credentials".to_string(),
        }
    }

    #[test]
    fn test_startup_screen() {
        let app = App::new(Vec::new(), None);
        let content = draw(&app);
        assert!(content.contains("Enter a city name to get started"));
        assert!(content.contains("Search for a city"));
    }

    #[test]
    fn test_loading_overlay_while_lookup_pending() {
        let mut app = App::new(Vec::new(), None);
        app.request_lookup(LookupRequest::Text("Nairobi".to_string()));
        assert!(draw(&app).contains("Loading weather..."));
    }

    #[test]
    fn test_error_overlay_after_failure() {
        let mut app = App::new(Vec::new(), None);
        app.present(&LookupOutcome::failure(ErrorKind::NotFound, "City not found"));
        let content = draw(&app);
        assert!(content.contains("Weather Data Unavailable"));
        assert!(content.contains("City not found"));
    }

    #[test]
    fn test_demo_outcome_shows_notice_and_weather() {
        let mut app = App::new(Vec::new(), None);
        app.present(&demo_outcome());
        let content = draw(&app);
        assert!(content.contains("Nairobi"));
        assert!(content.contains("Demo Mode"));
    }

    #[test]
    fn test_help_overlay_on_top() {
        let mut app = App::new(Vec::new(), None);
        app.show_help = true;
        assert!(draw(&app).contains("Keyboard Shortcuts"));
    }
}
