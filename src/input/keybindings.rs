use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::backend::ActionKind;
use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,

    // Actions
    Open,
    Back,
    Quit,
    Refresh,

    // Preview
    ScrollUp,
    ScrollDown,

    // AI features
    Summarize,
    DraftReply,
    Classify,

    // Help
    Help, // Toggle help view
}

impl Action {
    /// The backend action this key triggers, if any
    pub fn action_kind(self) -> Option<ActionKind> {
        match self {
            Action::Summarize => Some(ActionKind::Summarize),
            Action::DraftReply => Some(ActionKind::DraftReply),
            Action::Classify => Some(ActionKind::Classify),
            _ => None,
        }
    }
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// First key bound to an action, formatted for hints
    pub fn key_for(&self, action: Action) -> Option<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(event, _)| format_key_event(event))
            .collect();
        // Shortest label first so hints stay compact and stable
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        keys.into_iter().next()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        // Sort by category first, then by description, then by key
        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);
        map.insert(ctrl_key('d'), Action::PageDown);
        map.insert(ctrl_key('u'), Action::PageUp);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key('q'), Action::Quit);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(ctrl_key('r'), Action::Refresh);

        // Preview
        map.insert(shift_key('J'), Action::ScrollDown);
        map.insert(shift_key('K'), Action::ScrollUp);

        // AI features
        map.insert(key('s'), Action::Summarize);
        map.insert(key('r'), Action::DraftReply);
        map.insert(key('c'), Action::Classify);

        // Help
        map.insert(key('.'), Action::Help);
        map.insert(key('?'), Action::Help);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(key_code(KeyCode::F(5)), Action::Refresh);

        // Preview
        map.insert(shift_key_code(KeyCode::Down), Action::ScrollDown);
        map.insert(shift_key_code(KeyCode::Up), Action::ScrollUp);

        // AI features
        map.insert(key_code(KeyCode::F(7)), Action::Summarize);
        map.insert(key_code(KeyCode::F(8)), Action::DraftReply);
        map.insert(key_code(KeyCode::F(9)), Action::Classify);

        // Help
        map.insert(key('.'), Action::Help);
        map.insert(key_code(KeyCode::F(1)), Action::Help);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    // Uppercase letters already show the shift
    let shifted_char = matches!(event.code, KeyCode::Char(c) if c.is_ascii_uppercase());
    if event.modifiers.contains(KeyModifiers::SHIFT) && !shifted_char {
        parts.push("Shift+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

/// Get a human-readable description for an action
fn action_description(action: &Action) -> &'static str {
    match action {
        Action::Up => "Move up",
        Action::Down => "Move down",
        Action::Top => "Go to top",
        Action::Bottom => "Go to bottom",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::Open => "Open email",
        Action::Back => "Close popup",
        Action::Quit => "Quit",
        Action::Refresh => "Refresh email list",
        Action::ScrollUp => "Scroll preview up",
        Action::ScrollDown => "Scroll preview down",
        Action::Summarize => "Summarize email (AI)",
        Action::DraftReply => "Draft a reply (AI)",
        Action::Classify => "Classify email (AI)",
        Action::Help => "Toggle help",
    }
}

/// Get the category for an action
fn action_category(action: &Action) -> &'static str {
    match action {
        Action::Up
        | Action::Down
        | Action::Top
        | Action::Bottom
        | Action::PageUp
        | Action::PageDown => "Navigation",

        Action::Open | Action::Back | Action::Quit | Action::Refresh => "Actions",

        Action::ScrollUp | Action::ScrollDown => "Preview",

        Action::Summarize | Action::DraftReply | Action::Classify => "AI",

        Action::Help => "Help",
    }
}

/// Get sort order for categories
fn category_order(category: &str) -> u8 {
    match category {
        "Navigation" => 0,
        "Actions" => 1,
        "Preview" => 2,
        "AI" => 3,
        "Help" => 4,
        _ => 99,
    }
}
