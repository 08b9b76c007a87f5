//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};

use crate::app::state::Notification;
use crate::messages::ui_events::InputMode;
use crate::models::{Draft, DraftField, EntryTarget, Row};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Table
    pub rows: Vec<Row>,
    pub selected: usize,
    pub last_synced: Option<DateTime<Utc>>,

    // Dialog
    pub input_mode: InputMode,
    pub dialog_target: Option<EntryTarget>,
    pub dialog_focus: DraftField,
    pub dialog_cursor: usize,
    pub draft: Draft,

    // Theme
    pub dark_mode: bool,

    // Feedback
    pub notification: Option<Notification>,
    pub alert: Option<String>,
    pub show_help: bool,
    pub is_loading: bool,
}
