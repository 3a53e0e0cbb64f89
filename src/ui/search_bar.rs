//! Search input and the suggestions dropdown under it

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, SelectionList};

const PLACEHOLDER: &str = "Search for a city...";

/// Renders the search box and places the cursor at the end of the input
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.loading {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            " WeatherFlow ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " F1 help ",
            Style::default().fg(Color::DarkGray),
        )));

    let content = if app.input.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.input.as_str())
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if !app.show_help && area.width > 2 && area.height > 2 {
        let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width - 2;
        let x = (area.x + 1).saturating_add(typed).min(max_x);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Renders matching popular cities directly below the search box
pub fn render_suggestions(frame: &mut Frame, app: &App, search_area: Rect) {
    let suggestions = app.suggestions();
    if suggestions.is_empty() {
        return;
    }

    let frame_area = frame.area();
    let top = search_area.y + search_area.height;
    let wanted = suggestions.len() as u16 + 2;
    let height = wanted.min(frame_area.height.saturating_sub(top));
    if height < 3 {
        return;
    }
    let area = Rect::new(search_area.x, top, search_area.width, height);

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|city| ListItem::new(Line::from(*city)))
        .collect();

    let mut state = ListState::default();
    if app.selection_list() == SelectionList::Suggestions {
        state.select(app.selection);
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}
