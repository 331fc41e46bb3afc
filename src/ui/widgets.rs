use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::controller::View;

const ACCENT: Color = Color::Cyan;

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Place a `width` x `height` box in the middle of `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " QuickStudy AI ",
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  generator: {}", app.backend_name),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Topic field
            Constraint::Length(5), // Tone selector
            Constraint::Length(3), // Submit button
            Constraint::Min(0),    // Pro tip
        ])
        .split(area);

    render_topic_field(frame, app, chunks[0]);
    render_tone_selector(frame, app, chunks[1]);
    render_submit_button(frame, app, chunks[2]);
    render_pro_tip(frame, chunks[3]);
}

fn render_topic_field(frame: &mut Frame, app: &App, area: Rect) {
    let topic = app.controller.topic();
    let focused = app.focus == Focus::Topic;

    let (text, style) = if topic.is_empty() {
        ("e.g. Photosynthesis", Style::default().fg(Color::Gray))
    } else {
        (topic, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    };

    let field = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Study Topic ")
            .border_style(focus_style(focused)),
    );
    frame.render_widget(field, area);
}

fn render_tone_selector(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.controller.tone();
    let focused = app.focus == Focus::Tone;

    let lines: Vec<Line> = crate::models::Tone::ALL
        .iter()
        .map(|&tone| {
            if tone == selected {
                Line::from(Span::styled(
                    format!("(•) {tone}"),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("( ) {tone}"))
            }
        })
        .collect();

    let selector = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Teaching Style ")
            .border_style(focus_style(focused)),
    );
    frame.render_widget(selector, area);
}

fn render_submit_button(frame: &mut Frame, app: &App, area: Rect) {
    let label = if app.controller.is_loading() {
        "Generating..."
    } else {
        "Create Notes"
    };

    let style = if app.controller.can_submit() {
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn render_pro_tip(frame: &mut Frame, area: Rect) {
    let tip = vec![
        Line::from(Span::styled("Pro Tip", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(
            "Try being specific! Instead of just \"History\", try \"Causes of World War I\" for better results.",
        ),
    ];
    let paragraph = Paragraph::new(tip)
        .style(Style::default().fg(Color::Blue))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn placeholder(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

pub fn render_notes_pane(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match app.controller.state().view() {
        View::Notes(note) => format!(
            " {} · {} · {}  (Ctrl+Y: copy) ",
            note.topic,
            note.tone,
            note.created_at.with_timezone(&chrono::Local).format("%H:%M")
        ),
        _ => " Notes ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.controller.state().view() {
        View::Loading => {
            let body = placeholder(vec![
                Line::from(Span::styled(
                    "Consulting the library...",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Crafting your study notes.",
                    Style::default().fg(Color::DarkGray),
                )),
            ]);
            frame.render_widget(body, centered(inner, inner.width, 2));
            return;
        }
        View::Error(message) => {
            let body = placeholder(vec![
                Line::from(Span::styled(
                    "Oops, something went wrong",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(message.to_string()),
                Line::from(""),
                Line::from(Span::styled(
                    "Try Again (Ctrl+R)",
                    Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
                )),
            ]);
            frame.render_widget(body, centered(inner, inner.width, 6));
            return;
        }
        View::Empty => {
            let body = placeholder(vec![Line::from(Span::styled(
                "Enter a topic to start studying",
                Style::default().fg(Color::DarkGray),
            ))]);
            frame.render_widget(body, centered(inner, inner.width, 1));
            return;
        }
        View::Notes(note) => super::markdown::render_markdown_to_lines(&note.content),
    };

    // Account for wrapping so the scroll offset clamps to the real bottom
    let available_width = (inner.width as usize).max(1);
    let total_visual_lines: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(available_width).max(1))
        .sum();
    let max_scroll = total_visual_lines.saturating_sub(inner.height as usize);
    let actual_scroll = app.scroll_offset.min(max_scroll);
    app.scroll_offset = actual_scroll;

    let notes = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(notes, inner);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if let Some(status) = &app.status {
        (
            status.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else if app.can_copy() {
        (
            "Enter: Create Notes | Tab: Switch Field | Ctrl+Y: Copy | Ctrl+H: Help | Ctrl+C: Quit"
                .to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "Enter: Create Notes | Tab: Switch Field | Ctrl+H: Help | Ctrl+C: Quit".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
    };
    let help_text = vec![
        Line::from(Span::styled(
            "QuickStudy - Keyboard Shortcuts",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("General:"),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C        - Quit (press twice)"),
        Line::from(""),
        heading("Notes:"),
        Line::from("  Enter         - Create notes"),
        Line::from("  Tab           - Switch topic / style"),
        Line::from("  Up/Down       - Pick style (style focused)"),
        Line::from("  Ctrl+U        - Clear topic"),
        Line::from("  Ctrl+R        - Try again after an error"),
        Line::from("  Ctrl+Y        - Copy notes to clipboard"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  PgUp/PgDn     - Scroll notes"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: false });

    let popup_area = centered(area, 52, 22);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}
