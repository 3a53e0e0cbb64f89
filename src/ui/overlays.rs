//! Modal overlays drawn on top of the content: loading, error, demo notice

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::help_overlay::centered_rect;

pub const DEMO_NOTICE: &str = concat!(
    "Demo Mode: Using sample data. ",
    "Get an API key at https://openweathermap.org/api for real weather data."
);

pub const ERROR_TITLE: &str = "Weather Data Unavailable";

pub fn render_loading(frame: &mut Frame) {
    let area = centered_rect(30, 3, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Loading weather...",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, area);
}

pub fn render_error(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", ERROR_TITLE),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(paragraph, area);
}

/// Banner along the bottom of `area`
pub fn render_demo_notice(frame: &mut Frame, area: Rect) {
    let height = 4.min(area.height);
    let banner = Rect::new(area.x, area.y + area.height - height, area.width, height);
    frame.render_widget(Clear, banner);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        DEMO_NOTICE,
        Style::default().fg(Color::Yellow),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title_bottom(" Esc to dismiss "),
    );

    frame.render_widget(paragraph, banner);
}
