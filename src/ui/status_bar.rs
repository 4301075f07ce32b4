//! Status bar rendering with activity indicator and backend info

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::{Theme, symbols};
use super::widgets::{display_width, truncate_to_width};
use crate::app::state::AppState;
use crate::constants::SPINNER_FRAME_MS;

/// Status bar info for rendering
pub struct StatusInfo<'a> {
    pub total: usize,
    pub loading: bool,
    /// Progress text of the outstanding action, if any
    pub action: Option<&'static str>,
    /// Subject of the email the outstanding action was issued for
    pub action_subject: Option<&'a str>,
    pub backend_url: &'a str,
}

impl<'a> StatusInfo<'a> {
    pub fn from_state(state: &'a AppState, backend_url: &'a str) -> Self {
        let action_subject = state.in_flight.as_ref().and_then(|ticket| {
            state
                .emails
                .iter()
                .find(|e| e.id == ticket.email_id)
                .map(|e| e.subject.as_str())
        });

        Self {
            total: state.emails.len(),
            loading: state.loading,
            action: state.in_flight.as_ref().map(|t| t.kind.progress_label()),
            action_subject,
            backend_url,
        }
    }

    fn busy(&self) -> bool {
        self.loading || self.action.is_some()
    }

    /// Activity text shown next to the indicator
    fn activity(&self) -> Option<String> {
        match (self.action, self.loading) {
            (Some(label), _) => Some(match self.action_subject {
                Some(subject) if !subject.is_empty() => format!("{} \"{}\"...", label, subject),
                _ => format!("{}...", label),
            }),
            (None, true) => Some("Loading emails...".to_string()),
            (None, false) => None,
        }
    }
}

pub fn status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let style = Theme::status_bar();
    let width = area.width as usize;

    let (indicator, indicator_style) = if info.busy() {
        (format!(" {} ", spinner_char()), Theme::status_syncing())
    } else {
        (format!(" {} ", symbols::CONNECTED), Theme::status_connected())
    };

    let title = "Inbox ";
    let count = info.total.to_string();
    let count_suffix = if info.total == 1 { " email" } else { " emails" };

    let right = format!("{} ", info.backend_url);
    let left_width =
        display_width(&indicator) + display_width(title) + count.len() + count_suffix.len();

    // Activity gets whatever room is left between the two sides
    let activity = info.activity().map(|text| {
        let room = width.saturating_sub(left_width + display_width(&right) + 5);
        format!(" │ {}", truncate_to_width(&text, room))
    });
    let activity_width = activity.as_deref().map(display_width).unwrap_or(0);

    let right = if left_width + activity_width + display_width(&right) <= width {
        right
    } else {
        String::new()
    };

    let padding = width.saturating_sub(left_width + activity_width + display_width(&right));

    let mut spans = vec![
        Span::styled(indicator, indicator_style),
        Span::styled(title, style),
        Span::styled(count, style.add_modifier(Modifier::BOLD)),
        Span::styled(count_suffix, style),
    ];
    if let Some(activity) = activity {
        spans.push(Span::styled(activity, Theme::status_syncing()));
    }
    spans.push(Span::styled(" ".repeat(padding), style));
    spans.push(Span::styled(right, Theme::status_muted()));

    let paragraph = Paragraph::new(Line::from(spans)).style(style);
    frame.render_widget(paragraph, area);
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    let spinner = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let idx = (millis / SPINNER_FRAME_MS) as usize % spinner.chars().count();

    spinner.chars().nth(idx).unwrap_or('*')
}
