//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;

/// One entry of the bottom help bar
pub struct Hint<'a> {
    pub key: &'a str,
    pub desc: &'a str,
    pub enabled: bool,
}

impl<'a> Hint<'a> {
    pub fn new(key: &'a str, desc: &'a str) -> Self {
        Self {
            key,
            desc,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[Hint]) {
    let available_width = area.width as usize;

    // Format: " key desc │" (separator between hints)
    let hint_widths: Vec<usize> = hints
        .iter()
        .enumerate()
        .map(|(i, hint)| {
            let base = format!(" {} ", hint.key).width() + hint.desc.width();
            if i < hints.len() - 1 {
                base + 3 // " │ " separator
            } else {
                base + 1 // trailing space
            }
        })
        .collect();

    // Find how many hints we can fit
    let mut total_width = 0;
    let mut hints_to_show = 0;
    for width in &hint_widths {
        if total_width + width <= available_width {
            total_width += width;
            hints_to_show += 1;
        } else {
            break;
        }
    }

    // Show at least one hint if possible
    hints_to_show = hints_to_show.max(1).min(hints.len());

    let mut spans: Vec<Span> = Vec::new();
    for (i, hint) in hints.iter().take(hints_to_show).enumerate() {
        let (key_style, desc_style) = if hint.enabled {
            (Theme::help_key(), Theme::help_desc())
        } else {
            (Theme::help_disabled(), Theme::help_disabled())
        };
        spans.push(Span::styled(format!(" {} ", hint.key), key_style));
        spans.push(Span::styled(hint.desc.to_string(), desc_style));
        if i < hints_to_show - 1 {
            spans.push(Span::styled(" │ ", Theme::status_muted()));
        }
    }
    spans.push(Span::styled(" ", Theme::status_muted()));

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(paragraph, area);
}

/// Calculate display width of a string (accounting for Unicode)
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate string to fit display width, appending "..." when cut
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if width + char_width > max_width - 3 {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push_str("...");
    result
}

/// Pad a span list with spaces so it fills `width` columns
pub fn pad_line<'a>(mut spans: Vec<Span<'a>>, width: usize, style: Style) -> Line<'a> {
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
    Line::from(spans)
}

/// Sanitize text for display: remove control characters and ANSI escape sequences
pub fn sanitize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        // ANSI escape sequence (ESC [ ... letter)
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if c == '\r' {
            continue;
        }
        // Replace other control characters (except newline and tab) with space
        if c.is_control() && c != '\n' && c != '\t' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}
