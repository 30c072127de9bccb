//! Field rendering utilities for forms

use crate::state::Field;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of a single-line field (top border + content + bottom border)
pub const FIELD_HEIGHT: u16 = 3;

/// Text colour for a step fading in; `None` once the fade is done
pub fn fade_color(progress: Option<f32>) -> Color {
    match progress {
        Some(p) => {
            let level = 60.0 + p.clamp(0.0, 1.0) * 195.0;
            let level = level as u8;
            Color::Rgb(level, level, level)
        }
        None => Color::White,
    }
}

/// Draw a form field, with a cursor when focused
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &Field,
    is_focused: bool,
    fade: Option<f32>,
) {
    let style = if is_focused && fade.is_none() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(fade_color(fade))
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if field.value.is_empty() && !is_focused {
        "(empty)"
    } else {
        field.value.as_str()
    };

    let cursor = if is_focused { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
