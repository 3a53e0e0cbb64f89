//! Weather content screen
//!
//! Renders the current conditions header, the detail readings with meters,
//! the five forecast cards, and the recent searches panel. Before any
//! lookup has succeeded the welcome view is shown instead.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, SelectionList, WeatherView};
use crate::data::{CurrentConditions, ForecastEntry};
use crate::ui::format::{
    format_day, format_full_date, format_temperature, format_time, icon_glyph,
    temperature_color, to_local, visibility_fill,
};
use crate::ui::widgets::Meter;

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Cyan;
    pub const PRIMARY: Color = Color::White;
    pub const SECONDARY: Color = Color::Gray;
    pub const LABEL: Color = Color::DarkGray;
    /// Accent for demo data
    pub const DEMO: Color = Color::Magenta;
}

/// Width of the recent searches column
const RECENT_PANEL_WIDTH: u16 = 24;

/// Renders the body area: weather content or the welcome view, plus recents
pub fn render(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Local>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(RECENT_PANEL_WIDTH)])
        .split(area);

    match &app.view {
        Some(view) => render_weather(frame, view, chunks[0], now),
        None => render_welcome(frame, chunks[0]),
    }
    render_recent_searches(frame, app, chunks[1]);
}

/// Shown until the first lookup completes
pub fn render_welcome(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top_padding = inner.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        "WeatherFlow",
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter a city name to get started",
        Style::default().fg(colors::SECONDARY),
    )));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn render_weather(
    frame: &mut Frame,
    view: &WeatherView,
    area: Rect,
    now: DateTime<Local>,
) {
    let border_color = if view.is_demo {
        colors::DEMO
    } else {
        colors::HEADER
    };
    let mut title = format!(" {} ", view.conditions.display_name());
    if view.is_demo {
        title.push_str("(demo) ");
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            title,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(6), // details
            Constraint::Min(5),    // forecast
        ])
        .split(inner);

    render_header(frame, &view.conditions, chunks[0], now);
    render_details(frame, &view.conditions, chunks[1]);
    render_forecast(frame, view.forecast.entries(), chunks[2]);
}

/// Place, date, temperature and description
fn render_header(
    frame: &mut Frame,
    conditions: &CurrentConditions,
    area: Rect,
    now: DateTime<Local>,
) {
    let temp_style = Style::default()
        .fg(temperature_color(conditions.temperature))
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(
            format_full_date(&now),
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(vec![
            Span::raw(format!("{}  ", icon_glyph(&conditions.icon))),
            Span::styled(format_temperature(conditions.temperature), temp_style),
            Span::styled(
                format!("  {}", conditions.description),
                Style::default().fg(colors::PRIMARY),
            ),
        ]),
        Line::from(Span::styled(
            format!("Feels like {}", format_temperature(conditions.feels_like)),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Humidity, wind, pressure, sun times, and the two meters
fn render_details(frame: &mut Frame, conditions: &CurrentConditions, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let sun_time = |time: &Option<DateTime<chrono::Utc>>| {
        time.as_ref()
            .map(|t| format_time(&to_local(t)))
            .unwrap_or_else(|| "--".to_string())
    };

    let readings = vec![
        reading_line("Humidity", format!("{}%", conditions.humidity)),
        reading_line("Wind", format!("{:.1} m/s", conditions.wind_speed)),
        reading_line("Pressure", format!("{} hPa", conditions.pressure)),
        reading_line("Sunrise", sun_time(&conditions.sunrise)),
        reading_line("Sunset", sun_time(&conditions.sunset)),
    ];
    frame.render_widget(Paragraph::new(readings), columns[0]);

    let meter_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    let visibility_label = match conditions.visibility_km {
        Some(km) => format!("{:.1} km", km),
        None => "--".to_string(),
    };
    frame.render_widget(
        Paragraph::new(reading_line("Visibility", visibility_label)),
        meter_rows[0],
    );
    if let Some(km) = conditions.visibility_km {
        frame.render_widget(Meter::new(visibility_fill(km)), meter_rows[1]);
    }

    let cloud_label = match conditions.cloudiness {
        Some(percent) => format!("{}%", percent),
        None => "--".to_string(),
    };
    frame.render_widget(
        Paragraph::new(reading_line("Clouds", cloud_label)),
        meter_rows[2],
    );
    if let Some(percent) = conditions.cloudiness {
        frame.render_widget(
            Meter::new(f64::from(percent)).style(Style::default().fg(Color::Gray)),
            meter_rows[3],
        );
    }
}

fn reading_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", label), Style::default().fg(colors::LABEL)),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}

/// One card per forecast day
fn render_forecast(frame: &mut Frame, entries: &[ForecastEntry], area: Rect) {
    if entries.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = entries
        .iter()
        .map(|_| Constraint::Ratio(1, entries.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (entry, card) in entries.iter().zip(cards.iter()) {
        render_forecast_card(frame, entry, *card);
    }
}

fn render_forecast_card(frame: &mut Frame, entry: &ForecastEntry, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::LABEL))
        .title(Span::styled(
            format_day(&to_local(&entry.date)),
            Style::default().fg(colors::HEADER),
        ));

    let lines = vec![
        Line::from(icon_glyph(&entry.icon)),
        Line::from(vec![
            Span::styled(
                format_temperature(entry.high),
                Style::default().fg(temperature_color(entry.high)),
            ),
            Span::styled(" / ", Style::default().fg(colors::LABEL)),
            Span::styled(
                format_temperature(entry.low),
                Style::default().fg(temperature_color(entry.low)),
            ),
        ]),
        Line::from(Span::styled(
            entry.description.clone(),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Recent searches, most recent first; Up/Down selects when no suggestions show
fn render_recent_searches(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::LABEL))
        .title(" Recent ");

    if app.recent_searches.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No recent searches",
                Style::default().fg(colors::LABEL),
            )))
            .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .recent_searches
        .iter()
        .map(|search| ListItem::new(Line::from(search.as_str())))
        .collect();

    let mut state = ListState::default();
    if app.selection_list() == SelectionList::Recent {
        state.select(app.selection);
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DemoDataSynthesizer, LookupOutcome};
    use crate::orchestrator::Presenter;
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let now = Local.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, app, area, now);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_weather(is_demo: bool) -> App {
        let synthesizer = DemoDataSynthesizer::new();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let mut conditions = synthesizer.current_conditions("Lisbon", now);
        conditions.temperature = 21;
        let forecast = synthesizer.placeholder_forecast(now);

        let mut app = App::new(vec!["Lisbon".to_string(), "Porto".to_string()], None);
        let outcome = if is_demo {
            LookupOutcome::DemoFallback {
                conditions,
                forecast,
                reason: "invalid or missing credentials".to_string(),
            }
        } else {
            LookupOutcome::Success {
                conditions,
                forecast,
            }
        };
        app.present(&outcome);
        app
    }

    #[test]
    fn test_welcome_view_before_first_lookup() {
        let app = App::new(Vec::new(), None);
        let content = draw(&app);
        assert!(content.contains("WeatherFlow"));
        assert!(content.contains("Enter a city name to get started"));
        assert!(content.contains("No recent searches"));
    }

    #[test]
    fn test_weather_view_shows_header_and_forecast() {
        let app = app_with_weather(false);
        let content = draw(&app);

        assert!(content.contains("Lisbon"), "Should show place name");
        assert!(content.contains("Friday, October 16, 2026 at 02:30 PM"));
        assert!(content.contains("21°C"));
        assert!(content.contains("Humidity"));
        assert!(content.contains("Visibility"));
        assert!(content.contains("19°C / 13°C"), "First forecast card");
        assert!(!content.contains("(demo)"));
    }

    #[test]
    fn test_demo_view_is_marked() {
        let app = app_with_weather(true);
        assert!(draw(&app).contains("(demo)"));
    }

    #[test]
    fn test_recent_panel_lists_searches() {
        let app = app_with_weather(false);
        let content = draw(&app);
        assert!(content.contains("Recent"));
        assert!(content.contains("Porto"));
    }
}
