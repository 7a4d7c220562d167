//! UI module for rendering the feedback form

mod field;
mod form;

use crate::app::App;
use feedback_form::NoticeLevel;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let main_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };

    form::draw(frame, main_area, app);
    draw_status_bar(frame, app);
}

/// Draw the bottom status line with key hints and the current notice
fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next  "),
        Span::styled(
            feedback_form::platform::CAPTURE_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": screenshot  "),
        Span::styled(
            feedback_form::platform::SUBMIT_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": send  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ];

    if let Some(notice) = app.form.current_notice() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(&notice.message, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, status_area);
}
