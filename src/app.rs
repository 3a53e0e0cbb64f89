//! Application state management for WeatherFlow
//!
//! This module contains the terminal UI state: the search box, suggestion
//! and recent-search selection, and the loading / error / content page
//! model. `App` is the TUI's [`Presenter`]: the orchestrator reports into
//! it and the renderer reads from it.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::{CurrentConditions, Forecast, LookupOutcome};
use crate::orchestrator::{LookupRequest, Presenter};

/// Cities offered as suggestions while typing
pub const POPULAR_CITIES: [&str; 9] = [
    "London, UK",
    "Paris, France",
    "New York, US",
    "Tokyo, Japan",
    "Sydney, Australia",
    "Berlin, Germany",
    "Mumbai, India",
    "Beijing, China",
    "Toronto, Canada",
];

/// Maximum number of suggestions shown at once
pub const MAX_SUGGESTIONS: usize = 5;

/// Suggestions appear once the input is longer than this
pub const SUGGESTION_THRESHOLD: usize = 2;

/// How long the demo notice stays up unless dismissed
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

pub const GEOLOCATION_UNAVAILABLE_MESSAGE: &str =
    "Geolocation is not available. Pass --lat and --lon to set your location.";

/// Popular cities containing `input` (case-insensitive), at most [`MAX_SUGGESTIONS`]
pub fn suggest_cities(input: &str) -> Vec<&'static str> {
    let query = input.trim().to_lowercase();
    if query.chars().count() <= SUGGESTION_THRESHOLD {
        return Vec::new();
    }
    POPULAR_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// "Paris, France" -> "Paris"
pub fn city_from_suggestion(suggestion: &str) -> &str {
    suggestion.split(',').next().unwrap_or(suggestion).trim()
}

/// Which list the Up/Down selection currently applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionList {
    Suggestions,
    Recent,
}

/// The weather currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub conditions: CurrentConditions,
    pub forecast: Forecast,
    /// True when the data was synthesized
    pub is_demo: bool,
}

/// Dismissible banner shown with demo data
#[derive(Debug, Clone)]
pub struct DemoNotice {
    pub reason: String,
    pub shown_at: Instant,
}

/// Main application struct managing state and data
#[derive(Debug)]
pub struct App {
    /// Text typed into the search box
    pub input: String,
    /// Selected row in the active list, if any
    pub selection: Option<usize>,
    /// A lookup is in flight
    pub loading: bool,
    /// Last weather shown; `None` shows the welcome screen
    pub view: Option<WeatherView>,
    /// Error message overlay
    pub error: Option<String>,
    pub notice: Option<DemoNotice>,
    /// Most recent first
    pub recent_searches: Vec<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Configured position for Ctrl+L
    location: Option<(f64, f64)>,
    /// Lookup waiting for the event loop to run it
    pending_lookup: Option<LookupRequest>,
}

impl App {
    /// Creates a new App on the welcome screen
    pub fn new(recent_searches: Vec<String>, location: Option<(f64, f64)>) -> Self {
        Self {
            input: String::new(),
            selection: None,
            loading: false,
            view: None,
            error: None,
            notice: None,
            recent_searches,
            show_help: false,
            should_quit: false,
            location,
            pending_lookup: None,
        }
    }

    /// Queues a lookup and shows the loading state straight away
    pub fn request_lookup(&mut self, request: LookupRequest) {
        self.loading = true;
        self.error = None;
        self.pending_lookup = Some(request);
    }

    pub fn take_pending_lookup(&mut self) -> Option<LookupRequest> {
        self.pending_lookup.take()
    }

    /// Suggestions for the current input
    pub fn suggestions(&self) -> Vec<&'static str> {
        suggest_cities(&self.input)
    }

    /// Suggestions take over Up/Down while there are any
    pub fn selection_list(&self) -> SelectionList {
        if self.suggestions().is_empty() {
            SelectionList::Recent
        } else {
            SelectionList::Suggestions
        }
    }

    /// Entries of the active list, as they would be looked up
    fn selectable_entries(&self) -> Vec<String> {
        match self.selection_list() {
            SelectionList::Suggestions => self
                .suggestions()
                .into_iter()
                .map(|city| city_from_suggestion(city).to_string())
                .collect(),
            SelectionList::Recent => self.recent_searches.clone(),
        }
    }

    /// Clears the demo notice once it has been up for [`NOTICE_DURATION`]
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|notice| now.duration_since(notice.shown_at) >= NOTICE_DURATION);
        if expired {
            self.notice = None;
        }
    }

    /// Handles keyboard input
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char('l') if ctrl => {
                self.lookup_location();
            }
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Esc => {
                self.dismiss_or_quit();
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.selection = None;
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                self.selection = None;
            }
            _ => {}
        }
    }

    /// Esc closes the topmost thing: notice, error, input text, then the app
    fn dismiss_or_quit(&mut self) {
        if self.notice.is_some() {
            self.notice = None;
        } else if self.error.is_some() {
            self.error = None;
        } else if !self.input.is_empty() || self.selection.is_some() {
            self.input.clear();
            self.selection = None;
        } else {
            self.should_quit = true;
        }
    }

    /// Looks up the selected entry, or the typed text
    fn submit(&mut self) {
        let selected = self
            .selection
            .and_then(|index| self.selectable_entries().into_iter().nth(index));
        let text = selected.unwrap_or_else(|| self.input.clone());

        self.input.clear();
        self.selection = None;
        self.request_lookup(LookupRequest::Text(text));
    }

    fn lookup_location(&mut self) {
        match self.location {
            Some((latitude, longitude)) => self.request_lookup(LookupRequest::Coordinates {
                latitude,
                longitude,
            }),
            None => self.error = Some(GEOLOCATION_UNAVAILABLE_MESSAGE.to_string()),
        }
    }

    /// Moves the selection up, wrapping to the bottom
    fn move_selection_up(&mut self) {
        let count = self.selectable_entries().len();
        if count == 0 {
            return;
        }
        self.selection = Some(match self.selection {
            None | Some(0) => count - 1,
            Some(index) => index.min(count) - 1,
        });
    }

    /// Moves the selection down, wrapping to the top
    fn move_selection_down(&mut self) {
        let count = self.selectable_entries().len();
        if count == 0 {
            return;
        }
        self.selection = Some(match self.selection {
            None => 0,
            Some(index) => (index + 1) % count,
        });
    }
}

impl Presenter for App {
    fn show_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn present(&mut self, outcome: &LookupOutcome) {
        match outcome {
            LookupOutcome::Success {
                conditions,
                forecast,
            } => {
                self.view = Some(WeatherView {
                    conditions: conditions.clone(),
                    forecast: forecast.clone(),
                    is_demo: false,
                });
                self.notice = None;
            }
            LookupOutcome::DemoFallback {
                conditions,
                forecast,
                reason,
            } => {
                self.view = Some(WeatherView {
                    conditions: conditions.clone(),
                    forecast: forecast.clone(),
                    is_demo: true,
                });
                self.notice = Some(DemoNotice {
                    reason: reason.clone(),
                    shown_at: Instant::now(),
                });
            }
            LookupOutcome::Failure { message, .. } => {
                self.error = Some(message.clone());
            }
        }
    }

    fn show_recent_searches(&mut self, searches: &[String]) {
        self.recent_searches = searches.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DemoDataSynthesizer, ErrorKind};
    use chrono::Utc;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn demo_outcome() -> LookupOutcome {
        let synthesizer = DemoDataSynthesizer::new();
        let now = Utc::now();
        LookupOutcome::DemoFallback {
            conditions: synthesizer.current_conditions("Paris", now),
            forecast: synthesizer.placeholder_forecast(now),
            reason: "invalid or missing credentials".to_string(),
        }
    }

    fn success_outcome() -> LookupOutcome {
        let synthesizer = DemoDataSynthesizer::new();
        let now = Utc::now();
        LookupOutcome::Success {
            conditions: synthesizer.current_conditions("Paris", now),
            forecast: synthesizer.placeholder_forecast(now),
        }
    }

    #[test]
    fn test_initial_state_is_welcome() {
        let app = App::new(Vec::new(), None);
        assert!(app.view.is_none());
        assert!(app.error.is_none());
        assert!(!app.loading);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_suggestions_need_more_than_two_characters() {
        assert!(suggest_cities("pa").is_empty());
        assert_eq!(suggest_cities("par"), ["Paris, France"]);
        assert_eq!(suggest_cities("  TOK "), ["Tokyo, Japan"]);
    }

    #[test]
    fn test_suggestions_are_capped() {
        // ", " matches every entry
        let all = suggest_cities(" , ");
        assert!(all.is_empty(), "trimmed input is too short");

        let many = suggest_cities("an, ");
        assert!(many.len() <= MAX_SUGGESTIONS);
        assert_eq!(suggest_cities("ina"), ["Beijing, China"]);
    }

    #[test]
    fn test_city_from_suggestion() {
        assert_eq!(city_from_suggestion("New York, US"), "New York");
        assert_eq!(city_from_suggestion("Oslo"), "Oslo");
    }

    #[test]
    fn test_typing_and_enter_queues_text_lookup() {
        let mut app = App::new(Vec::new(), None);
        type_text(&mut app, "Lima");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(
            app.take_pending_lookup(),
            Some(LookupRequest::Text("Lima".to_string()))
        );
        assert!(app.input.is_empty());
        assert!(app.loading);
        assert!(app.take_pending_lookup().is_none());
    }

    #[test]
    fn test_enter_on_empty_input_still_queues_lookup() {
        let mut app = App::new(Vec::new(), None);
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(
            app.take_pending_lookup(),
            Some(LookupRequest::Text(String::new()))
        );
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let mut app = App::new(Vec::new(), None);
        type_text(&mut app, "Rome");
        app.handle_key(key_event(KeyCode::Backspace));
        assert_eq!(app.input, "Rom");
    }

    #[test]
    fn test_selecting_a_suggestion_looks_up_city_name() {
        let mut app = App::new(Vec::new(), None);
        type_text(&mut app, "new");
        assert_eq!(app.selection_list(), SelectionList::Suggestions);

        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(
            app.take_pending_lookup(),
            Some(LookupRequest::Text("New York".to_string()))
        );
    }

    #[test]
    fn test_selecting_a_recent_search() {
        let recent = vec!["Oslo".to_string(), "Lima".to_string(), "Rome".to_string()];
        let mut app = App::new(recent, None);
        assert_eq!(app.selection_list(), SelectionList::Recent);

        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selection, Some(1));
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(
            app.take_pending_lookup(),
            Some(LookupRequest::Text("Lima".to_string()))
        );
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let recent = vec!["Oslo".to_string(), "Lima".to_string()];
        let mut app = App::new(recent, None);

        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.selection, Some(1));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selection, Some(0));
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.selection, Some(1));
    }

    #[test]
    fn test_selection_ignored_without_entries() {
        let mut app = App::new(Vec::new(), None);
        app.handle_key(key_event(KeyCode::Down));
        assert!(app.selection.is_none());
    }

    #[test]
    fn test_ctrl_l_uses_configured_location() {
        let mut app = App::new(Vec::new(), Some((45.76, 4.84)));
        app.handle_key(ctrl('l'));

        assert_eq!(
            app.take_pending_lookup(),
            Some(LookupRequest::Coordinates {
                latitude: 45.76,
                longitude: 4.84
            })
        );
        assert!(app.input.is_empty(), "Ctrl+L should not type into the box");
    }

    #[test]
    fn test_ctrl_l_without_location_shows_error() {
        let mut app = App::new(Vec::new(), None);
        app.handle_key(ctrl('l'));

        assert!(app.take_pending_lookup().is_none());
        assert_eq!(app.error.as_deref(), Some(GEOLOCATION_UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new(Vec::new(), None);
        type_text(&mut app, "Par");
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_esc_dismisses_notice_then_error_then_input_then_quits() {
        let mut app = App::new(Vec::new(), None);
        app.present(&demo_outcome());
        app.error = Some("boom".to_string());
        type_text(&mut app, "Oslo");

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.notice.is_none());
        assert!(app.error.is_some());

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.error.is_none());
        assert_eq!(app.input, "Oslo");

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.input.is_empty());
        assert!(!app.should_quit);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_toggles_and_swallows_keys() {
        let mut app = App::new(Vec::new(), None);
        app.handle_key(key_event(KeyCode::F(1)));
        assert!(app.show_help);

        type_text(&mut app, "abc");
        assert!(app.input.is_empty());

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_present_success_replaces_view_and_clears_notice() {
        let mut app = App::new(Vec::new(), None);
        app.present(&demo_outcome());
        assert!(app.notice.is_some());

        app.present(&success_outcome());

        let view = app.view.as_ref().expect("view should be set");
        assert!(!view.is_demo);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_present_demo_sets_view_and_notice() {
        let mut app = App::new(Vec::new(), None);
        app.present(&demo_outcome());

        assert!(app.view.as_ref().is_some_and(|view| view.is_demo));
        let notice = app.notice.as_ref().expect("notice should be set");
        assert_eq!(notice.reason, "invalid or missing credentials");
    }

    #[test]
    fn test_present_failure_keeps_previous_view() {
        let mut app = App::new(Vec::new(), None);
        app.present(&success_outcome());
        app.present(&LookupOutcome::failure(ErrorKind::NotFound, "City not found"));

        assert!(app.view.is_some());
        assert_eq!(app.error.as_deref(), Some("City not found"));
    }

    #[test]
    fn test_loading_toggles_and_clears_error() {
        let mut app = App::new(Vec::new(), None);
        app.error = Some("old".to_string());

        app.show_loading();
        assert!(app.loading);
        assert!(app.error.is_none());

        app.hide_loading();
        assert!(!app.loading);
    }

    #[test]
    fn test_show_recent_searches_replaces_list() {
        let mut app = App::new(vec!["Oslo".to_string()], None);
        app.show_recent_searches(&["Lima".to_string(), "Oslo".to_string()]);
        assert_eq!(app.recent_searches, ["Lima", "Oslo"]);
    }

    #[test]
    fn test_notice_expires_after_duration() {
        let mut app = App::new(Vec::new(), None);
        app.present(&demo_outcome());
        let shown_at = app.notice.as_ref().map(|n| n.shown_at).unwrap();

        app.tick(shown_at + Duration::from_secs(1));
        assert!(app.notice.is_some());

        app.tick(shown_at + NOTICE_DURATION);
        assert!(app.notice.is_none());
    }
}
