//! Field rendering utilities

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn focus_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a bordered field showing a text value
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        // A trailing newline opens an empty last line
        if display_value.ends_with('\n') {
            lines.push(Line::default());
        }
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans.push(Span::styled(cursor, cursor_style));
            } else {
                lines.push(Line::from(Span::styled(cursor, cursor_style)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, focus_style(is_active)),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(focus_style(is_active));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a bordered row of options with the selected one highlighted
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    options: &[(&str, bool)],
    is_active: bool,
) {
    let mut spans = Vec::new();
    for (option, selected) in options {
        let marker = if *selected { "(•) " } else { "( ) " };
        let style = if *selected {
            Style::default().fg(Color::Yellow)
        } else {
            focus_style(is_active)
        };
        spans.push(Span::styled(format!("{marker}{option}   "), style));
    }

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(focus_style(is_active));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw a button that may be disabled
pub fn draw_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool, is_active: bool) {
    let style = match (enabled, is_active) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Black).bg(Color::Cyan),
        (true, false) => Style::default().fg(Color::White),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_active));

    frame.render_widget(
        Paragraph::new(format!(" {label} ")).style(style).block(block),
        area,
    );
}
