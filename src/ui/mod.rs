//! UI module for rendering the TUI

mod field_renderer;
mod form;
mod review;

use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Step or confirmation
            Constraint::Length(1), // Status / error
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    if app.form.state().submitted {
        review::draw_submitted(frame, chunks[1]);
    } else {
        form::draw_step(frame, chunks[1], app);
    }

    draw_status(frame, chunks[2], app);
    draw_help(frame, chunks[3], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.form.state();
    let progress = match state.active_index() {
        Some(index) => format!("Step {} of {}", index + 1, state.steps.len()),
        None => "Submitted".to_string(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", app.form.title()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(progress, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

/// Error message, submitting indicator or last status message
fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.form.state();
    let line = if app.form.is_submitting() {
        Line::from(Span::styled(
            " Submitting…",
            Style::default().fg(Color::Yellow),
        ))
    } else if state.has_error() {
        Line::from(Span::styled(
            format!(" ✗ {}", state.error_message),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(Color::Cyan);
    let mut spans = vec![];

    if !app.form.state().submitted {
        spans.push(Span::styled(" Tab", key_style));
        spans.push(Span::raw(": next field  "));
        if !app.form.is_first_step() {
            spans.push(Span::styled(BACK_SHORTCUT, key_style));
            spans.push(Span::raw(": back  "));
        }
        if app.form.is_last_step() {
            spans.push(Span::styled(SUBMIT_SHORTCUT, key_style));
            spans.push(Span::raw(": submit  "));
        } else {
            spans.push(Span::styled(NEXT_SHORTCUT, key_style));
            spans.push(Span::raw(": next step  "));
        }
    }
    spans.push(Span::styled(" Esc", key_style));
    spans.push(Span::raw(": quit"));

    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
