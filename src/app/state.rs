//! Application state and the reducer that drives it
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.
//!
//! [`update`] is the only place state changes. It performs no I/O; anything
//! that needs the network comes back as an [`Effect`] for the event loop.

use crate::backend::{ActionKind, ActionTicket, Email, EmailId};
use crate::config::StaleResultPolicy;
use crate::constants::{PAGE_SIZE, PREVIEW_WRAP_ESTIMATE};
use crate::input::KeybindingEntry;

/// AI output for the selected email. Empty string means no result yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiResults {
    pub summary: String,
    pub classification: String,
    pub draft: String,
}

impl AiResults {
    pub fn get(&self, kind: ActionKind) -> &str {
        match kind {
            ActionKind::Summarize => &self.summary,
            ActionKind::DraftReply => &self.draft,
            ActionKind::Classify => &self.classification,
        }
    }

    fn slot_mut(&mut self, kind: ActionKind) -> &mut String {
        match kind {
            ActionKind::Summarize => &mut self.summary,
            ActionKind::DraftReply => &mut self.draft,
            ActionKind::Classify => &mut self.classification,
        }
    }
}

/// Help popup contents
#[derive(Debug, Clone, PartialEq)]
pub struct HelpState {
    pub keybindings: Vec<KeybindingEntry>,
    pub scroll: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub emails: Vec<Email>,
    /// Highlighted row in the list; independent of the selection
    pub cursor: usize,
    pub selected: Option<Email>,
    /// Readable body of the selected email, converted once on selection
    pub selected_body: String,
    pub results: AiResults,
    /// The action call currently outstanding, if any
    pub in_flight: Option<ActionTicket>,
    /// A list request is outstanding
    pub loading: bool,
    /// At least one list request has finished (success or failure)
    pub loaded_once: bool,
    pub preview_scroll: usize,
    pub help: Option<HelpState>,
    pub stale_results: StaleResultPolicy,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StaleResultPolicy::default())
    }
}

impl AppState {
    pub fn new(stale_results: StaleResultPolicy) -> Self {
        Self {
            emails: Vec::new(),
            cursor: 0,
            selected: None,
            selected_body: String::new(),
            results: AiResults::default(),
            in_flight: None,
            loading: false,
            loaded_once: false,
            preview_scroll: 0,
            help: None,
            stale_results,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Anything outstanding that warrants a spinner
    pub fn is_busy(&self) -> bool {
        self.loading || self.in_flight.is_some()
    }

    pub fn selected_id(&self) -> Option<&EmailId> {
        self.selected.as_ref().map(|e| &e.id)
    }

    pub fn is_selected(&self, id: &EmailId) -> bool {
        self.selected_id() == Some(id)
    }

    /// Rows the scrollable preview needs: the body followed by the summary and
    /// draft sections. Wrapping is estimated at a fixed width.
    pub fn preview_rows(&self) -> usize {
        let mut rows = estimated_rows(&self.selected_body);
        for kind in [ActionKind::Summarize, ActionKind::DraftReply] {
            let text = self.results.get(kind);
            if !text.is_empty() {
                // Blank separator + section title
                rows += 2 + estimated_rows(text);
            }
        }
        rows
    }

    /// Largest useful scroll offset for the preview
    pub fn max_preview_scroll(&self) -> usize {
        self.preview_rows().saturating_sub(1)
    }

    fn select(&mut self, email: Email) {
        self.selected_body = email.display_body();
        self.selected = Some(email);
        self.results = AiResults::default();
        self.preview_scroll = 0;
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.selected_body.clear();
        self.results = AiResults::default();
        self.preview_scroll = 0;
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.emails.len().saturating_sub(1));
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.emails.is_empty() {
            return;
        }
        let max = self.emails.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    /// Replace the list, keeping the selection when the email is still present.
    fn replace_emails(&mut self, emails: Vec<Email>) {
        self.emails = emails;
        self.clamp_cursor();

        let Some(current) = self.selected.as_ref() else {
            return;
        };
        match self.emails.iter().find(|e| e.id == current.id) {
            Some(fresh) if fresh == current => {}
            Some(fresh) => {
                // Same email with updated fields: keep results, refresh the body
                self.selected_body = fresh.display_body();
                self.selected = Some(fresh.clone());
                self.preview_scroll = self.preview_scroll.min(self.max_preview_scroll());
            }
            None => {
                tracing::debug!("Selected email {} no longer listed", current.id);
                self.clear_selection();
            }
        }
    }

    /// Store an action result, subject to the stale-result policy
    fn store_result(&mut self, ticket: &ActionTicket, text: Option<String>) {
        let current = self.is_selected(&ticket.email_id);
        if !current && self.stale_results == StaleResultPolicy::Discard {
            tracing::debug!(
                kind = %ticket.kind,
                id = %ticket.email_id,
                "Discarding result for an email that is no longer selected"
            );
            return;
        }

        let text = text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| ticket.kind.placeholder().to_string());
        *self.results.slot_mut(ticket.kind) = text;
    }

    /// Clear the in-flight marker if it belongs to this ticket
    fn finish(&mut self, ticket: &ActionTicket) {
        if self.in_flight.as_ref() == Some(ticket) {
            self.in_flight = None;
        } else {
            tracing::debug!(kind = %ticket.kind, id = %ticket.email_id, "Completion for unknown call");
        }
    }
}

fn estimated_rows(text: &str) -> usize {
    text.lines()
        .map(|line| line.chars().count().div_ceil(PREVIEW_WRAP_ESTIMATE).max(1))
        .sum()
}

/// Everything that can change the state
#[derive(Debug, Clone)]
pub enum Msg {
    /// Request the email list (startup and refresh)
    LoadEmails,
    Loaded(Vec<Email>),
    LoadFailed,
    MoveCursor(isize),
    PageDown,
    PageUp,
    CursorTop,
    CursorBottom,
    /// Select an email and move the cursor onto it
    Select(EmailId),
    RunAction(ActionKind),
    ActionSucceeded {
        ticket: ActionTicket,
        text: Option<String>,
    },
    ActionFailed {
        ticket: ActionTicket,
    },
    ScrollPreview(i32),
    ShowHelp(Vec<KeybindingEntry>),
    CloseHelp,
    ScrollHelp(i32),
}

/// I/O requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadEmails,
    Call(ActionTicket),
}

/// Apply one message, returning the new state and any effects to run.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match msg {
        Msg::LoadEmails => {
            if !state.loading {
                state.loading = true;
                effects.push(Effect::LoadEmails);
            }
        }
        Msg::Loaded(emails) => {
            state.loading = false;
            state.loaded_once = true;
            state.replace_emails(emails);
        }
        Msg::LoadFailed => {
            state.loading = false;
            state.loaded_once = true;
        }

        Msg::MoveCursor(delta) => state.move_cursor(delta),
        Msg::PageDown => state.move_cursor(PAGE_SIZE as isize),
        Msg::PageUp => state.move_cursor(-(PAGE_SIZE as isize)),
        Msg::CursorTop => state.cursor = 0,
        Msg::CursorBottom => state.cursor = state.emails.len().saturating_sub(1),

        Msg::Select(id) => {
            if let Some(index) = state.emails.iter().position(|e| e.id == id) {
                state.cursor = index;
                let email = state.emails[index].clone();
                state.select(email);
            }
        }

        Msg::RunAction(kind) => {
            if state.in_flight.is_none()
                && let Some(id) = state.selected_id()
            {
                let ticket = ActionTicket::new(kind, id.clone());
                state.in_flight = Some(ticket.clone());
                effects.push(Effect::Call(ticket));
            }
        }
        Msg::ActionSucceeded { ticket, text } => {
            state.finish(&ticket);
            state.store_result(&ticket, text);
        }
        Msg::ActionFailed { ticket } => {
            state.finish(&ticket);
        }

        Msg::ScrollPreview(delta) => {
            let max = state.max_preview_scroll() as i64;
            state.preview_scroll = (state.preview_scroll as i64 + delta as i64).clamp(0, max) as usize;
        }

        Msg::ShowHelp(keybindings) => {
            state.help = Some(HelpState {
                keybindings,
                scroll: 0,
            });
        }
        Msg::CloseHelp => state.help = None,
        Msg::ScrollHelp(delta) => {
            if let Some(help) = state.help.as_mut() {
                let max = help.keybindings.len().saturating_sub(1) as i64;
                help.scroll = (help.scroll as i64 + delta as i64).clamp(0, max) as usize;
            }
        }
    }

    (state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(id: u64, subject: &str) -> Email {
        Email {
            id: EmailId::from(id),
            subject: subject.to_string(),
            preview: "p".to_string(),
            sender: "a@b.com".to_string(),
            body: "line one\nline two\nline three".to_string(),
            received_at: None,
            priority: None,
            sentiment: None,
        }
    }

    fn loaded(emails: Vec<Email>) -> AppState {
        let (state, _) = update(AppState::default(), Msg::LoadEmails);
        update(state, Msg::Loaded(emails)).0
    }

    fn run(state: AppState, msg: Msg) -> AppState {
        update(state, msg).0
    }

    fn with_results(mut state: AppState) -> AppState {
        state.results = AiResults {
            summary: "s".to_string(),
            classification: "c".to_string(),
            draft: "d".to_string(),
        };
        state
    }

    #[test]
    fn test_startup_requests_list_once() {
        let (state, effects) = update(AppState::default(), Msg::LoadEmails);
        assert!(state.loading);
        assert_eq!(effects, vec![Effect::LoadEmails]);

        let (_, effects) = update(state, Msg::LoadEmails);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_loaded_list_preserves_order() {
        let list = vec![email(3, "c"), email(1, "a"), email(2, "b")];
        let state = loaded(list.clone());
        assert_eq!(state.emails, list);
        assert!(!state.loading);
        assert!(state.loaded_once);
    }

    #[test]
    fn test_load_failure_leaves_list_empty() {
        let (state, _) = update(AppState::default(), Msg::LoadEmails);
        let state = run(state, Msg::LoadFailed);
        assert!(state.emails.is_empty());
        assert!(!state.loading);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_select_resets_results() {
        let state = loaded(vec![email(1, "a"), email(2, "b")]);
        let state = with_results(run(state, Msg::Select(EmailId::from(1))));

        let state = run(state, Msg::Select(EmailId::from(2)));
        assert_eq!(state.selected_id(), Some(&EmailId::from(2)));
        assert_eq!(state.results, AiResults::default());
        assert_eq!(state.cursor, 1);

        // Re-selecting the same email also resets
        let state = with_results(state);
        let state = run(state, Msg::Select(EmailId::from(2)));
        assert_eq!(state.results, AiResults::default());
    }

    #[test]
    fn test_select_moves_cursor_to_email() {
        let state = loaded(vec![email(1, "a"), email(2, "b")]);
        let state = run(state, Msg::Select(EmailId::from(2)));
        assert_eq!(state.selected_id(), Some(&EmailId::from(2)));
        assert_eq!(state.cursor, 1);

        // Unknown id leaves the selection alone
        let state = run(state, Msg::Select(EmailId::from(9)));
        assert_eq!(state.selected_id(), Some(&EmailId::from(2)));
    }

    #[test]
    fn test_run_action_without_selection_is_noop() {
        let state = loaded(vec![email(1, "a")]);
        for kind in ActionKind::ALL {
            let (after, effects) = update(state.clone(), Msg::RunAction(kind));
            assert!(effects.is_empty());
            assert_eq!(after, state);
        }
    }

    #[test]
    fn test_run_action_issues_call_for_selection() {
        let state = run(loaded(vec![email(1, "a")]), Msg::Select(EmailId::from(1)));
        let (state, effects) = update(state, Msg::RunAction(ActionKind::DraftReply));

        let ticket = ActionTicket::new(ActionKind::DraftReply, EmailId::from(1));
        assert_eq!(effects, vec![Effect::Call(ticket.clone())]);
        assert_eq!(state.in_flight, Some(ticket));
        assert!(state.is_in_flight());
    }

    #[test]
    fn test_run_action_ignored_while_in_flight() {
        let state = run(loaded(vec![email(1, "a")]), Msg::Select(EmailId::from(1)));
        let state = run(state, Msg::RunAction(ActionKind::Summarize));

        let (after, effects) = update(state.clone(), Msg::RunAction(ActionKind::Classify));
        assert!(effects.is_empty());
        assert_eq!(after, state);
    }

    #[test]
    fn test_success_fills_only_matching_slot() {
        let state = run(loaded(vec![email(1, "a")]), Msg::Select(EmailId::from(1)));
        let state = run(state, Msg::RunAction(ActionKind::Summarize));
        let ticket = ActionTicket::new(ActionKind::Summarize, EmailId::from(1));

        let state = run(
            state,
            Msg::ActionSucceeded {
                ticket,
                text: Some("  A short summary.\n".to_string()),
            },
        );

        assert_eq!(state.results.summary, "  A short summary.\n");
        assert_eq!(state.results.classification, "");
        assert_eq!(state.results.draft, "");
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_missing_or_empty_text_uses_placeholder() {
        let base = run(loaded(vec![email(1, "a")]), Msg::Select(EmailId::from(1)));

        for (kind, text) in [
            (ActionKind::Summarize, None),
            (ActionKind::DraftReply, Some(String::new())),
            (ActionKind::Classify, Some("   ".to_string())),
        ] {
            let state = run(base.clone(), Msg::RunAction(kind));
            let ticket = ActionTicket::new(kind, EmailId::from(1));
            let state = run(state, Msg::ActionSucceeded { ticket, text });
            assert_eq!(state.results.get(kind), kind.placeholder());
        }
    }

    #[test]
    fn test_failure_leaves_slots_and_clears_in_flight() {
        let state = run(loaded(vec![email(1, "a")]), Msg::Select(EmailId::from(1)));
        let mut state = run(state, Msg::RunAction(ActionKind::Classify));
        state.results.summary = "kept".to_string();

        let ticket = ActionTicket::new(ActionKind::Classify, EmailId::from(1));
        let state = run(state, Msg::ActionFailed { ticket });

        assert_eq!(state.results.summary, "kept");
        assert_eq!(state.results.classification, "");
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_classify_scenario() {
        let state = loaded(vec![email(1, "Hi")]);
        assert_eq!(state.emails.len(), 1);
        assert_eq!(state.emails[0].id, EmailId::from(1));

        let state = run(state, Msg::Select(EmailId::from(1)));
        assert_eq!(state.selected_id(), Some(&EmailId::from(1)));

        let (state, effects) = update(state, Msg::RunAction(ActionKind::Classify));
        let Effect::Call(ticket) = effects[0].clone() else {
            panic!("expected a call");
        };
        let state = run(
            state,
            Msg::ActionSucceeded {
                ticket,
                text: Some("Urgent".to_string()),
            },
        );
        assert_eq!(state.results.classification, "Urgent");
    }

    #[test]
    fn test_stale_result_is_discarded_by_default() {
        let state = loaded(vec![email(1, "a"), email(2, "b")]);
        let state = run(state, Msg::Select(EmailId::from(1)));
        let state = run(state, Msg::RunAction(ActionKind::Summarize));
        let state = run(state, Msg::Select(EmailId::from(2)));
        assert!(state.is_in_flight());

        let ticket = ActionTicket::new(ActionKind::Summarize, EmailId::from(1));
        let state = run(
            state,
            Msg::ActionSucceeded {
                ticket,
                text: Some("for email 1".to_string()),
            },
        );

        assert_eq!(state.results, AiResults::default());
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_stale_result_applied_when_configured() {
        let mut state = loaded(vec![email(1, "a"), email(2, "b")]);
        state.stale_results = StaleResultPolicy::Apply;
        let state = run(state, Msg::Select(EmailId::from(1)));
        let state = run(state, Msg::RunAction(ActionKind::Summarize));
        let state = run(state, Msg::Select(EmailId::from(2)));

        let ticket = ActionTicket::new(ActionKind::Summarize, EmailId::from(1));
        let state = run(
            state,
            Msg::ActionSucceeded {
                ticket,
                text: Some("for email 1".to_string()),
            },
        );

        assert_eq!(state.results.summary, "for email 1");
    }

    #[test]
    fn test_refresh_keeps_selection_still_listed() {
        let state = loaded(vec![email(1, "a"), email(2, "b")]);
        let state = with_results(run(state, Msg::Select(EmailId::from(2))));

        let state = run(state, Msg::LoadEmails);
        let state = run(state, Msg::Loaded(vec![email(2, "b"), email(3, "c")]));

        assert_eq!(state.selected_id(), Some(&EmailId::from(2)));
        assert_eq!(state.results.summary, "s");
    }

    #[test]
    fn test_refresh_clears_selection_that_vanished() {
        let state = loaded(vec![email(1, "a"), email(2, "b"), email(3, "c")]);
        let state = with_results(run(state, Msg::Select(EmailId::from(3))));

        let state = run(state, Msg::LoadEmails);
        let state = run(state, Msg::Loaded(vec![email(1, "a")]));

        assert!(state.selected.is_none());
        assert_eq!(state.results, AiResults::default());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let state = loaded(vec![email(1, "a"), email(2, "b")]);
        let state = run(state, Msg::MoveCursor(-1));
        assert_eq!(state.cursor, 0);
        let state = run(state, Msg::PageDown);
        assert_eq!(state.cursor, 1);
        let state = run(state, Msg::PageUp);
        assert_eq!(state.cursor, 0);

        let empty = run(AppState::default(), Msg::MoveCursor(3));
        assert_eq!(empty.cursor, 0);
    }

    #[test]
    fn test_preview_scroll_is_bounded_and_reset() {
        let state = loaded(vec![email(1, "a"), email(2, "b")]);
        let state = run(state, Msg::Select(EmailId::from(1)));
        let state = run(state, Msg::ScrollPreview(10));
        assert_eq!(state.preview_scroll, 2);
        let state = run(state, Msg::ScrollPreview(-1));
        assert_eq!(state.preview_scroll, 1);

        let state = run(state, Msg::Select(EmailId::from(2)));
        assert_eq!(state.preview_scroll, 0);
    }

    #[test]
    fn test_preview_scroll_reaches_long_draft() {
        let state = run(loaded(vec![email(1, "a")]), Msg::Select(EmailId::from(1)));
        let ticket = ActionTicket::new(ActionKind::DraftReply, EmailId::from(1));
        let draft = (1..=30).map(|n| format!("draft line {}", n)).collect::<Vec<_>>();
        let state = run(state, Msg::RunAction(ActionKind::DraftReply));
        let state = run(
            state,
            Msg::ActionSucceeded {
                ticket,
                text: Some(draft.join("\n")),
            },
        );

        // 3 body rows, then separator, title and 30 draft rows
        assert_eq!(state.preview_rows(), 35);
        let state = run(state, Msg::ScrollPreview(100));
        assert_eq!(state.preview_scroll, 34);
    }

    #[test]
    fn test_help_popup_scroll() {
        let entries = vec![
            KeybindingEntry {
                key: "j".to_string(),
                description: "Move down".to_string(),
                category: "Navigation",
            },
            KeybindingEntry {
                key: "k".to_string(),
                description: "Move up".to_string(),
                category: "Navigation",
            },
        ];
        let state = run(AppState::default(), Msg::ShowHelp(entries));
        let state = run(state, Msg::ScrollHelp(5));
        assert_eq!(state.help.as_ref().map(|h| h.scroll), Some(1));

        let state = run(state, Msg::CloseHelp);
        assert!(state.help.is_none());
    }
}
