//! Translate user actions into reducer messages

use crate::constants::PAGE_SIZE;
use crate::input::{Action, KeyBindings};

use super::App;
use super::state::{AppState, Msg};

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) {
        if let Some(msg) = action_message(action, &self.state, &self.bindings) {
            self.dispatch(msg).await;
        }
    }
}

/// Message for an action in the current state. `None` means nothing to do.
fn action_message(action: Action, state: &AppState, bindings: &KeyBindings) -> Option<Msg> {
    let help_open = state.help.is_some();

    let msg = match action {
        // Navigation (scrolls the popup while help is open)
        Action::Up if help_open => Msg::ScrollHelp(-1),
        Action::Down if help_open => Msg::ScrollHelp(1),
        Action::PageUp if help_open => Msg::ScrollHelp(-(PAGE_SIZE as i32)),
        Action::PageDown if help_open => Msg::ScrollHelp(PAGE_SIZE as i32),
        Action::Up => Msg::MoveCursor(-1),
        Action::Down => Msg::MoveCursor(1),
        Action::PageUp => Msg::PageUp,
        Action::PageDown => Msg::PageDown,
        Action::Top => Msg::CursorTop,
        Action::Bottom => Msg::CursorBottom,

        Action::Open => Msg::Select(state.emails.get(state.cursor)?.id.clone()),
        Action::Back if help_open => Msg::CloseHelp,
        Action::Back => return None,
        Action::Quit => return None, // Handled in event loop
        Action::Refresh => Msg::LoadEmails,

        Action::ScrollUp => Msg::ScrollPreview(-1),
        Action::ScrollDown => Msg::ScrollPreview(1),

        Action::Summarize | Action::DraftReply | Action::Classify => {
            Msg::RunAction(action.action_kind()?)
        }

        Action::Help if help_open => Msg::CloseHelp,
        Action::Help => Msg::ShowHelp(bindings.all_bindings()),
    };

    Some(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::HelpState;
    use crate::backend::{ActionKind, Email, EmailId};
    use crate::config::KeybindingMode;

    #[test]
    fn test_actions_map_to_messages() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = AppState::default();

        assert!(matches!(
            action_message(Action::Down, &state, &bindings),
            Some(Msg::MoveCursor(1))
        ));
        assert!(matches!(
            action_message(Action::Classify, &state, &bindings),
            Some(Msg::RunAction(ActionKind::Classify))
        ));
        assert!(matches!(
            action_message(Action::Refresh, &state, &bindings),
            Some(Msg::LoadEmails)
        ));
        assert!(action_message(Action::Back, &state, &bindings).is_none());
    }

    #[test]
    fn test_open_selects_row_under_cursor() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let mut state = AppState::default();
        assert!(action_message(Action::Open, &state, &bindings).is_none());

        state.emails = [1, 2]
            .into_iter()
            .map(|id| Email {
                id: EmailId::from(id),
                subject: String::new(),
                preview: String::new(),
                sender: String::new(),
                body: String::new(),
                received_at: None,
                priority: None,
                sentiment: None,
            })
            .collect();
        state.cursor = 1;

        assert!(matches!(
            action_message(Action::Open, &state, &bindings),
            Some(Msg::Select(id)) if id == EmailId::from(2)
        ));
    }

    #[test]
    fn test_help_toggles_and_scrolls() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let mut state = AppState::default();

        let Some(Msg::ShowHelp(entries)) = action_message(Action::Help, &state, &bindings) else {
            panic!("expected help to open");
        };
        assert!(!entries.is_empty());

        state.help = Some(HelpState {
            keybindings: entries,
            scroll: 0,
        });
        assert!(matches!(
            action_message(Action::Down, &state, &bindings),
            Some(Msg::ScrollHelp(1))
        ));
        assert!(matches!(
            action_message(Action::Help, &state, &bindings),
            Some(Msg::CloseHelp)
        ));
        assert!(matches!(
            action_message(Action::Back, &state, &bindings),
            Some(Msg::CloseHelp)
        ));
    }
}
