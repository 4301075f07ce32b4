//! Preview pane: headers, body and the AI results for the selected email

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::state::AppState;
use crate::backend::{ActionKind, Email};

use super::RenderContext;
use super::status_bar::spinner_char;
use super::theme::{Theme, symbols};
use super::widgets::sanitize_text;

pub fn render_preview(frame: &mut Frame, area: Rect, state: &AppState, ctx: &RenderContext) {
    // 1-char left padding for visual separation from the list border
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let inner = chunks[1];

    let Some(email) = state.selected.as_ref() else {
        render_empty_hint(frame, inner, ctx);
        return;
    };

    let header_lines = header_lines(email, state);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_lines.len() as u16 + 1), // Headers + border
            Constraint::Min(0),                                 // Body + AI sections
        ])
        .split(inner);

    render_headers(frame, sections[0], header_lines);
    render_content(frame, sections[1], state);
}

fn render_empty_hint(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let keys = &ctx.keys;
    let hint_lines = vec![
        Line::from(Span::styled("No email selected", Theme::text_secondary())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} to navigate", keys.nav),
            Theme::text_muted(),
        )),
        Line::from(Span::styled(
            format!("{} to open", keys.open),
            Theme::text_muted(),
        )),
        Line::from(Span::styled(
            format!("{} for help", keys.help),
            Theme::text_muted(),
        )),
    ];
    let paragraph = Paragraph::new(hint_lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn header_lines<'a>(email: &'a Email, state: &'a AppState) -> Vec<Line<'a>> {
    let label_style = Theme::label();
    let value_style = Theme::text();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("From:    ", label_style),
            Span::styled(sanitize_text(&email.sender), value_style),
        ]),
        Line::from(vec![
            Span::styled("Subject: ", label_style),
            Span::styled(sanitize_text(&email.subject), Theme::text_bold()),
        ]),
    ];

    if let Some(date) = email.received_display() {
        lines.push(Line::from(vec![
            Span::styled("Date:    ", label_style),
            Span::styled(date, value_style),
        ]));
    }

    let tags: Vec<&str> = [email.priority.as_deref(), email.sentiment.as_deref()]
        .into_iter()
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .collect();
    if !tags.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Tags:    ", label_style),
            Span::styled(tags.join(", "), Theme::badge()),
        ]));
    }

    // Classification lives in the headers; it is a single label
    let classification = panel_text(state, ActionKind::Classify);
    if panel_visible(state, ActionKind::Classify) {
        lines.push(Line::from(vec![
            Span::styled("Class:   ", label_style),
            Span::styled(format!("{} {}", symbols::AI, classification), Theme::text_ai()),
        ]));
    }

    lines
}

fn render_headers(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Body followed by the summary and draft, scrolled together so long
/// results stay reachable.
fn render_content(frame: &mut Frame, area: Rect, state: &AppState) {
    // Clear the area first to prevent rendering artifacts when content changes
    frame.render_widget(Clear, area);

    let body = sanitize_text(&state.selected_body);
    let mut lines: Vec<Line> = if body.trim().is_empty() {
        vec![Line::from(Span::styled("(empty message)", Theme::text_muted()))]
    } else {
        body.lines()
            .map(|line| Line::styled(line.to_string(), Theme::text()))
            .collect()
    };

    for kind in [ActionKind::Summarize, ActionKind::DraftReply] {
        if !panel_visible(state, kind) {
            continue;
        }
        lines.push(Line::from(""));
        lines.push(section_title(kind, area.width as usize));
        lines.extend(
            panel_text(state, kind)
                .lines()
                .map(|line| Line::styled(line.to_string(), Theme::text_ai())),
        );
    }

    let scroll = state.preview_scroll.min(u16::MAX as usize) as u16;
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn section_title(kind: ActionKind, width: usize) -> Line<'static> {
    let title = match kind {
        ActionKind::Summarize => "Summary",
        ActionKind::DraftReply => "Draft reply",
        ActionKind::Classify => "Classification",
    };
    let label = format!("── {} {} ", symbols::AI, title);
    let rule = "─".repeat(width.saturating_sub(label.width()));
    Line::from(vec![
        Span::styled(label, Theme::text_ai().add_modifier(Modifier::BOLD)),
        Span::styled(rule, Theme::border()),
    ])
}

/// A panel shows once it has a result or while its call for this email is running
fn panel_visible(state: &AppState, kind: ActionKind) -> bool {
    !state.results.get(kind).is_empty() || running_here(state, kind)
}

fn running_here(state: &AppState, kind: ActionKind) -> bool {
    state
        .in_flight
        .as_ref()
        .is_some_and(|t| t.kind == kind && state.is_selected(&t.email_id))
}

fn panel_text(state: &AppState, kind: ActionKind) -> String {
    let result = state.results.get(kind);
    if running_here(state, kind) && result.is_empty() {
        format!("{} {}...", spinner_char(), kind.progress_label())
    } else {
        sanitize_text(result)
    }
}
