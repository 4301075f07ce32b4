//! Email list rendering with virtual scrolling.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::state::AppState;
use crate::backend::Email;
use crate::constants::SCROLL_TARGET_FRACTION;

use super::RenderContext;
use super::theme::{Theme, symbols, with_selection_bg};
use super::widgets::{display_width, pad_line, sanitize_text, truncate_to_width};

/// Each email takes two lines: sender/date, then subject/preview
const LINES_PER_EMAIL: usize = 2;

pub fn render_email_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    ctx: &RenderContext,
    borders: Borders,
) {
    let block = Block::default()
        .borders(borders)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.emails.is_empty() {
        let msg = if state.loading || !state.loaded_once {
            "Loading emails...".to_string()
        } else {
            format!("No emails. Press {} to refresh.", ctx.keys.refresh)
        };
        let paragraph = Paragraph::new(msg)
            .style(Theme::text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let visible_rows = (inner.height as usize / LINES_PER_EMAIL).max(1);

    // Keep the cursor near the top quarter of the pane
    let target_row = visible_rows / SCROLL_TARGET_FRACTION;
    let first = state
        .cursor
        .saturating_sub(target_row)
        .min(state.emails.len().saturating_sub(visible_rows));

    let items: Vec<ListItem> = state
        .emails
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows)
        .map(|(index, email)| {
            let highlighted = index == state.cursor;
            // The open row carries its classification badge
            let badge = state
                .is_selected(&email.id)
                .then_some(state.results.classification.as_str());
            email_item(email, highlighted, badge, inner.width as usize)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn email_item(
    email: &Email,
    highlighted: bool,
    badge: Option<&str>,
    width: usize,
) -> ListItem<'static> {
    let base_style = with_selection_bg(Theme::text(), highlighted);

    // Line 1: ● sender                              2025-09-01 08:15
    let marker = if badge.is_some() {
        symbols::SELECTED
    } else {
        symbols::NOT_SELECTED
    };
    let date = email.received_display().unwrap_or_default();
    let badge = badge
        .map(|label| sanitize_text(label.trim()))
        .filter(|label| !label.is_empty())
        .map(|label| format!("[{}] ", label));
    let badge_width = badge.as_deref().map(display_width).unwrap_or(0);
    let date_width = display_width(&date);
    let sender_width = width.saturating_sub(2 + badge_width + date_width + 1);
    let sender = if email.sender.is_empty() {
        "(unknown sender)".to_string()
    } else {
        sanitize_text(&email.sender)
    };
    let sender = truncate_to_width(&sender, sender_width);

    let sender_style = if highlighted {
        Theme::selected_bold()
    } else {
        Theme::text_bold()
    };
    let used = 2 + display_width(&sender);
    let gap = width.saturating_sub(used + badge_width + date_width);

    let mut spans = vec![
        Span::styled(format!("{} ", marker), with_selection_bg(Theme::text_accent(), highlighted)),
        Span::styled(sender, sender_style),
        Span::styled(" ".repeat(gap), base_style),
    ];
    if let Some(badge) = badge {
        spans.push(Span::styled(badge, with_selection_bg(Theme::badge(), highlighted)));
    }
    spans.push(Span::styled(date, with_selection_bg(Theme::text_muted(), highlighted)));
    let line1 = Line::from(spans);

    // Line 2:   Subject · preview text
    let subject = if email.subject.is_empty() {
        "(no subject)".to_string()
    } else {
        sanitize_text(&email.subject)
    };
    let text_width = width.saturating_sub(2);
    let subject = truncate_to_width(&subject, text_width);
    let remaining = text_width.saturating_sub(display_width(&subject) + 3);

    let mut spans = vec![
        Span::styled("  ", base_style),
        Span::styled(subject, with_selection_bg(Theme::text(), highlighted)),
    ];
    if remaining > 3 {
        let preview = sanitize_text(&email.display_preview()).replace(['\n', '\t'], " ");
        spans.push(Span::styled(" · ", with_selection_bg(Theme::text_muted(), highlighted)));
        spans.push(Span::styled(
            truncate_to_width(&preview, remaining),
            with_selection_bg(Theme::text_muted(), highlighted),
        ));
    }
    let line2 = pad_line(spans, width, base_style);

    ListItem::new(vec![line1, line2])
}
