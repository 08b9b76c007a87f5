//! Command handlers - state transitions for UI events and network responses
//!
//! Handlers never perform I/O. Anything that must reach the remote service is
//! returned as a [`NetworkCommand`] for the actor to forward.

use chrono::{DateTime, Duration, Utc};

use crate::app::state::{Dialog, Notification, NotificationKind};
use crate::app::AppState;
use crate::constants::{MISSING_FIELDS_ALERT, NOTIFICATION_TTL_MS, SUCCESS_MESSAGE};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Draft, EntryTarget};

impl AppState {
    // ========================
    // Refresh
    // ========================

    /// The one place a full re-fetch is issued
    pub fn refresh(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.in_flight += 1;
        NetworkCommand::ListRows { id }
    }

    /// Sync button: re-fetch and acknowledge, nothing else
    pub fn sync(&mut self) -> NetworkCommand {
        let cmd = self.refresh();
        self.notify_success();
        cmd
    }

    // ========================
    // Table navigation
    // ========================

    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.selected = (self.selected + 1) % self.rows.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.rows.len() - 1);
        }
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    // ========================
    // Dialog lifecycle
    // ========================

    /// Open the dialog on the selected row
    ///
    /// A row without an ID cannot be addressed, so its draft is submitted as
    /// a new entry instead.
    pub fn open_edit_selected(&mut self) {
        if let Some(row) = self.selected_row().cloned() {
            self.draft = Draft::from_row(&row);
            let target = if row.id.is_empty() {
                EntryTarget::NewEntry
            } else {
                EntryTarget::ExistingEntry(row.id)
            };
            self.dialog = Some(Dialog::new(target, &self.draft));
        }
    }

    /// Open an empty dialog for a new row
    pub fn open_new_entry(&mut self) {
        self.draft = Draft::default();
        self.dialog = Some(Dialog::new(EntryTarget::NewEntry, &self.draft));
    }

    /// Close the dialog and reset the draft to empty fields
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.draft = Draft::default();
    }

    /// Route the draft to Create or Update depending on how the dialog was opened
    pub fn submit_dialog(&mut self) -> Option<NetworkCommand> {
        let target = self.dialog.as_ref()?.target.clone();

        match target {
            EntryTarget::ExistingEntry(key) if key.is_empty() => {
                self.alert = Some(String::from(MISSING_FIELDS_ALERT));
                None
            }
            EntryTarget::ExistingEntry(key) => {
                let id = self.next_id();
                self.in_flight += 1;
                Some(NetworkCommand::UpdateRow {
                    id,
                    key,
                    row: self.draft.to_row(),
                })
            }
            EntryTarget::NewEntry => {
                if !self.draft.is_complete() {
                    self.alert = Some(String::from(MISSING_FIELDS_ALERT));
                    return None;
                }
                let id = self.next_id();
                self.in_flight += 1;
                Some(NetworkCommand::CreateRow {
                    id,
                    row: self.draft.to_row(),
                })
            }
        }
    }

    // ========================
    // Dialog field editing
    // ========================

    pub fn next_field(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.focus = dialog.focus.next();
            dialog.cursor = self.draft.field(dialog.focus).len();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.focus = dialog.focus.prev();
            dialog.cursor = self.draft.field(dialog.focus).len();
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(dialog) = self.dialog.as_mut() {
            let input = self.draft.field_mut(dialog.focus);
            if dialog.cursor <= input.len() {
                input.insert(dialog.cursor, c);
                dialog.cursor += c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            if dialog.cursor == 0 {
                return;
            }
            let input = self.draft.field_mut(dialog.focus);
            let prev_pos = input[..dialog.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            dialog.cursor = prev_pos;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            let input = self.draft.field(dialog.focus);
            dialog.cursor = input[..dialog.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            let input = self.draft.field(dialog.focus);
            if dialog.cursor < input.len() {
                dialog.cursor = input[dialog.cursor..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| dialog.cursor + i)
                    .unwrap_or(input.len());
            }
        }
    }

    // ========================
    // Delete
    // ========================

    /// Delete the selected row; rows without an ID are left alone
    pub fn delete_selected(&mut self) -> Option<NetworkCommand> {
        let key = self.selected_row()?.id.clone();
        if key.is_empty() {
            return None;
        }
        Some(self.delete_row(key))
    }

    pub fn delete_row(&mut self, key: String) -> NetworkCommand {
        let id = self.next_id();
        self.in_flight += 1;
        NetworkCommand::DeleteRow { id, key }
    }

    // ========================
    // Theme and popups
    // ========================

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ========================
    // Notifications
    // ========================

    fn notify_success(&mut self) {
        self.notify(NotificationKind::Success, String::from(SUCCESS_MESSAGE));
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        self.notification = Some(Notification {
            kind,
            message,
            shown_at: Utc::now(),
        });
    }

    /// Hide the notification once its lifetime has passed. Returns true if it was hidden.
    pub fn expire_notification(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|n| now - n.shown_at >= Duration::milliseconds(NOTIFICATION_TTL_MS));
        if expired {
            self.notification = None;
        }
        expired
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a gateway result. Successful mutations return the refresh command.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match response {
            NetworkResponse::RowsLoaded { rows, .. } => {
                self.rows = rows;
                self.clamp_selection();
                self.last_synced = Some(Utc::now());
                None
            }
            NetworkResponse::RowCreated { .. } | NetworkResponse::RowUpdated { .. } => {
                self.close_dialog();
                self.notify_success();
                Some(self.refresh())
            }
            NetworkResponse::RowDeleted { .. } => {
                self.notify_success();
                Some(self.refresh())
            }
            NetworkResponse::Failed { id, op, message } => {
                tracing::error!(id, op = op.as_str(), %message, "Gateway call failed");
                self.notify(
                    NotificationKind::Error,
                    format!("Failed to {}: {}", op.as_str(), message),
                );
                None
            }
        }
    }
}
