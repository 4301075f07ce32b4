//! Terminal rendering
//!
//! - `list` - Email list with virtual scrolling
//! - `preview` - Selected email, headers and AI result panels
//! - `popups` - Help overlay
//! - `status_bar` / `widgets` - Bars and shared helpers

mod list;
mod popups;
mod preview;
mod status_bar;
pub mod theme;
mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders},
};

use crate::app::state::AppState;
use crate::backend::ActionKind;
use crate::constants::MIN_SPLIT_VIEW_WIDTH;
use crate::input::{Action, KeyBindings};

use list::render_email_list;
use popups::render_help_popup;
use preview::render_preview;
use status_bar::{StatusInfo, status_bar};
use theme::Theme;
use widgets::{Hint, help_bar};

/// Render-time data that does not change while the app runs
pub struct RenderContext {
    pub backend_url: String,
    /// Percentage of the width given to the list in split view
    pub split_ratio: u16,
    pub keys: KeyHints,
}

impl RenderContext {
    pub fn new(backend_url: String, split_ratio: u16, bindings: &KeyBindings) -> Self {
        Self {
            backend_url,
            split_ratio,
            keys: KeyHints::from_bindings(bindings),
        }
    }
}

/// Key labels for the help bar and empty-state hints
pub struct KeyHints {
    pub nav: String,
    pub open: String,
    pub scroll: String,
    pub summarize: String,
    pub draft: String,
    pub classify: String,
    pub refresh: String,
    pub help: String,
    pub quit: String,
}

impl KeyHints {
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let key = |action| bindings.key_for(action).unwrap_or_default();
        Self {
            nav: format!("{}/{}", key(Action::Down), key(Action::Up)),
            open: key(Action::Open),
            scroll: format!("{}/{}", key(Action::ScrollDown), key(Action::ScrollUp)),
            summarize: key(Action::Summarize),
            draft: key(Action::DraftReply),
            classify: key(Action::Classify),
            refresh: key(Action::Refresh),
            help: key(Action::Help),
            quit: key(Action::Quit),
        }
    }

    pub fn for_kind(&self, kind: ActionKind) -> &str {
        match kind {
            ActionKind::Summarize => &self.summarize,
            ActionKind::DraftReply => &self.draft,
            ActionKind::Classify => &self.classify,
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState, ctx: &RenderContext) {
    frame.render_widget(Block::default().style(Theme::main_bg()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // List + preview
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    status_bar(
        frame,
        chunks[0],
        &StatusInfo::from_state(state, &ctx.backend_url),
    );

    let main_area = chunks[1];
    if main_area.width >= MIN_SPLIT_VIEW_WIDTH {
        let ratio = ctx.split_ratio;
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(ratio),
                Constraint::Percentage(100 - ratio),
            ])
            .split(main_area);

        render_email_list(frame, split[0], state, ctx, Borders::RIGHT);
        render_preview(frame, split[1], state, ctx);
    } else {
        // Narrow terminal: stack the list above the preview
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_area);

        render_email_list(frame, split[0], state, ctx, Borders::BOTTOM);
        render_preview(frame, split[1], state, ctx);
    }

    render_help_bar(frame, chunks[2], state, ctx);

    // Help popup (rendered last so it appears on top)
    if let Some(help) = &state.help {
        render_help_popup(frame, frame.area(), &help.keybindings, help.scroll);
    }
}

fn render_help_bar(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    state: &AppState,
    ctx: &RenderContext,
) {
    let keys = &ctx.keys;

    if state.help.is_some() {
        let hints = [Hint::new(&keys.nav, "scroll"), Hint::new(&keys.help, "close")];
        help_bar(frame, area, &hints);
        return;
    }

    // Action hints are dimmed while a call is outstanding or nothing is selected
    let actions_enabled = state.selected.is_some() && !state.is_in_flight();
    let mut hints = vec![Hint::new(&keys.nav, "nav"), Hint::new(&keys.open, "open")];
    hints.extend(
        ActionKind::ALL
            .iter()
            .map(|kind| Hint::new(keys.for_kind(*kind), kind.label()).enabled(actions_enabled)),
    );
    hints.extend([
        Hint::new(&keys.scroll, "scroll"),
        Hint::new(&keys.refresh, "refresh"),
        Hint::new(&keys.help, "help"),
        Hint::new(&keys.quit, "quit"),
    ]);
    help_bar(frame, area, &hints);
}
