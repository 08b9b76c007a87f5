//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{Draft, DraftField, EntryTarget, Row};

/// Open entry dialog
#[derive(Clone, Debug, PartialEq)]
pub struct Dialog {
    pub target: EntryTarget,
    pub focus: DraftField,
    /// Byte offset into the focused field
    pub cursor: usize,
}

impl Dialog {
    pub fn new(target: EntryTarget, draft: &Draft) -> Self {
        Dialog {
            target,
            focus: DraftField::Id,
            cursor: draft.field(DraftField::Id).len(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown at the bottom of the screen
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Last successful fetch
    pub rows: Vec<Row>,
    pub selected: usize,
    pub last_synced: Option<DateTime<Utc>>,

    // Entry dialog
    pub dialog: Option<Dialog>,
    pub draft: Draft,

    // Cosmetic
    pub dark_mode: bool,

    // Feedback
    pub notification: Option<Notification>,
    pub alert: Option<String>,
    pub show_help: bool,

    // Requests
    pub next_request_id: u64,
    pub in_flight: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            rows: Vec::new(),
            selected: 0,
            last_synced: None,
            dialog: None,
            draft: Draft::default(),
            dark_mode: false,
            notification: None,
            alert: None,
            show_help: false,
            next_request_id: 1,
            in_flight: 0,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        AppState {
            dark_mode: config.dark_mode,
            ..Self::new()
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_notification_visible(&self) -> bool {
        self.notification.is_some()
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    pub fn input_mode(&self) -> InputMode {
        if self.is_dialog_open() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            rows: self.rows.clone(),
            selected: self.selected,
            last_synced: self.last_synced,
            input_mode: self.input_mode(),
            dialog_target: self.dialog.as_ref().map(|d| d.target.clone()),
            dialog_focus: self.dialog.as_ref().map(|d| d.focus).unwrap_or_default(),
            dialog_cursor: self.dialog.as_ref().map(|d| d.cursor).unwrap_or(0),
            draft: self.draft.clone(),
            dark_mode: self.dark_mode,
            notification: self.notification.clone(),
            alert: self.alert.clone(),
            show_help: self.show_help,
            is_loading: self.in_flight > 0,
        }
    }
}
