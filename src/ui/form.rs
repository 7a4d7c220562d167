//! Feedback form rendering

use super::field::{draw_button, draw_choice_field, draw_text_field};
use crate::app::App;
use feedback_form::{Category, FormFocus, Rating};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the feedback form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let view = form.view();
    let draft = form.draft();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category
            Constraint::Min(5),    // Text
            Constraint::Length(3), // Rating
            Constraint::Length(3), // Screenshot
            Constraint::Length(3), // Submit
        ])
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Send Feedback ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let categories: Vec<(&str, bool)> = Category::ALL
        .iter()
        .map(|c| (c.label(), draft.category() == Some(*c)))
        .collect();
    draw_choice_field(
        frame,
        chunks[0],
        "Category (required)",
        &categories,
        app.focus == FormFocus::Category,
    );

    draw_text_field(
        frame,
        chunks[1],
        "Feedback",
        draft.text(),
        app.focus == FormFocus::Text,
        true,
    );

    let ratings: Vec<(&str, bool)> = Rating::ALL
        .iter()
        .map(|r| (r.label(), draft.rating() == Some(*r)))
        .collect();
    draw_choice_field(
        frame,
        chunks[2],
        "Rating (optional)",
        &ratings,
        app.focus == FormFocus::Rating,
    );

    let screenshot_status = if view.is_capturing {
        "Capturing...".to_string()
    } else if let Some(bytes) = form.capture_state().screenshot() {
        format!("Attached ({} bytes)  r: retake  d: remove  v: preview", bytes.len())
    } else if view.capture_enabled {
        "None  Enter: take screenshot".to_string()
    } else {
        "Unavailable".to_string()
    };
    draw_text_field(
        frame,
        chunks[3],
        "Screenshot",
        &screenshot_status,
        app.focus == FormFocus::Screenshot,
        false,
    );

    let submit_label = if view.is_submitting {
        "Sending..."
    } else {
        "Send"
    };
    draw_button(
        frame,
        chunks[4],
        submit_label,
        view.submit_enabled,
        app.focus == FormFocus::Submit,
    );

    if view.preview_open {
        if let Some(preview) = form.screenshot_preview() {
            draw_preview(frame, chunks[1], &preview);
        }
    }
}

/// Draw the captured screenshot over the given area
fn draw_preview(frame: &mut Frame, area: Rect, preview: &str) {
    let block = Block::default()
        .title(" Screenshot preview (v to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(preview).block(block), area);
}
