//! Active step rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use super::review;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

/// Draw the active step, with the review panel alongside on the last step
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let Some(step) = app.form.state().active_step() else {
        return;
    };

    let (fields_area, review_area) = if app.form.is_last_step() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let border_color = if app.form.is_submitting() {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(fields_area);
    frame.render_widget(block, fields_area);

    if step.fields.is_empty() {
        let empty = Paragraph::new("Nothing to fill in on this step")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
    } else {
        let mut constraints: Vec<Constraint> = step
            .fields
            .iter()
            .map(|_| Constraint::Length(FIELD_HEIGHT))
            .collect();
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let fade = app.transition_clock.progress(Instant::now());
        for (index, field) in step.fields.iter().enumerate() {
            let focused = index == app.focused_field && !app.form.is_submitting();
            draw_field(frame, chunks[index], field, focused, fade);
        }
    }

    if let Some(review_area) = review_area {
        review::draw_review(frame, review_area, app);
    }
}
