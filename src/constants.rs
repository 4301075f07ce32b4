//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers and fixed strings to make them discoverable.

/// Backend address used when the config file does not override it.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Shown in the summary panel when the backend returns no summary text.
pub const SUMMARY_PLACEHOLDER: &str = "No summary generated.";

/// Shown in the draft panel when the backend returns no draft text.
pub const DRAFT_PLACEHOLDER: &str = "No draft generated.";

/// Shown as the classification when the backend returns no label.
pub const CLASSIFICATION_PLACEHOLDER: &str = "Unclassified";

/// Capacity of the command channel into the backend actor.
pub const BACKEND_COMMAND_CAPACITY: usize = 16;

/// Capacity of the event channel out of the backend actor.
pub const BACKEND_EVENT_CAPACITY: usize = 32;

/// Input poll timeout while a request is outstanding (keeps the spinner moving).
pub const POLL_BUSY_MS: u64 = 50;

/// Input poll timeout when idle.
pub const POLL_IDLE_MS: u64 = 150;

/// Number of rows moved by PageUp/PageDown.
pub const PAGE_SIZE: usize = 10;

/// Maximum length of a preview derived from the body when the backend sends none.
pub const DERIVED_PREVIEW_CHARS: usize = 120;

/// Column width assumed when estimating how far the preview can scroll.
pub const PREVIEW_WRAP_ESTIMATE: usize = 40;

/// Wrap width used when converting HTML bodies to plain text.
pub const HTML_WRAP_WIDTH: usize = 100;

// === UI Constants ===

/// Minimum terminal width to show split view (list + preview side by side).
/// Below this width the panes are stacked vertically.
pub const MIN_SPLIT_VIEW_WIDTH: u16 = 80;

/// Minimum split ratio percentage for the inbox split view.
pub const SPLIT_RATIO_MIN: u16 = 30;

/// Maximum split ratio percentage for the inbox split view.
pub const SPLIT_RATIO_MAX: u16 = 70;

/// Target scroll position as fraction of visible area (1/N from top).
pub const SCROLL_TARGET_FRACTION: usize = 4;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;
