use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::AppState;

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    /// Terminal was resized; nothing changed but a redraw is needed
    Redraw,
    Action(Action),
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key(key_event, state, bindings)
        }
        Event::Resize(..) => InputResult::Redraw,
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Check if we're in help mode
    if state.help.is_some() {
        return handle_help_input(key, bindings);
    }

    let Some(action) = bindings.get(&key) else {
        return InputResult::Continue;
    };

    match action {
        Action::Quit => InputResult::Quit,
        // Action keys are disabled while a call is outstanding
        _ if action.action_kind().is_some() && state.is_in_flight() => InputResult::Continue,
        _ => InputResult::Action(action),
    }
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: j/k and page keys scroll, Esc or "." closes
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Help | Action::Back => return InputResult::Action(Action::Help),
            Action::Up | Action::ScrollUp => return InputResult::Action(Action::Up),
            Action::Down | Action::ScrollDown => return InputResult::Action(Action::Down),
            Action::PageUp | Action::PageDown => return InputResult::Action(action),
            Action::Quit => return InputResult::Quit,
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('.') => InputResult::Action(Action::Help),
        KeyCode::Up | KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => InputResult::Action(Action::Down),
        _ => InputResult::Continue,
    }
}
