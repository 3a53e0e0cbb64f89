//! Horizontal fill meter for percentage readings (visibility, cloud cover)

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const FILLED: char = '█';
const EMPTY: char = '░';

/// A one-line bar filled proportionally to a percentage
pub struct Meter {
    /// Fill level, clamped to 0-100
    percent: f64,
    /// Style for the filled part
    style: Style,
    /// Style for the unfilled part
    empty_style: Style,
}

impl Meter {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            style: Style::default().fg(Color::Cyan),
            empty_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Number of cells to fill in a bar `width` cells wide
    fn filled_cells(&self, width: u16) -> u16 {
        ((self.percent / 100.0) * f64::from(width)).round() as u16
    }
}

impl Widget for Meter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled = self.filled_cells(area.width);

        for offset in 0..area.width {
            let (symbol, style) = if offset < filled {
                (FILLED, self.style)
            } else {
                (EMPTY, self.empty_style)
            };

            if let Some(cell) = buf.cell_mut((area.x + offset, area.y)) {
                cell.set_char(symbol).set_style(style);
            }
        }
    }
}
