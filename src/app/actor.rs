//! App actor - message loop processing UI events and network responses

use std::time::Duration;

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// How often notification expiry is checked
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial fetch
        let cmd = self.state.refresh();
        self.dispatch(cmd);
        self.render();

        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    // A closed UI channel means the terminal is gone
                    let quit = match event {
                        Some(event) => self.handle_ui_event(event),
                        None => true,
                    };
                    if quit {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.render();
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response) {
                        self.dispatch(cmd);
                    }
                    self.render();
                }
                _ = tick.tick() => {
                    if self.state.expire_notification(chrono::Utc::now()) {
                        self.render();
                    }
                }
            }
        }
    }

    fn dispatch(&self, cmd: NetworkCommand) {
        tracing::debug!(?cmd, "Dispatching network command");
        let _ = self.network_tx.send(cmd);
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Table navigation
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),

            // Row actions
            UiEvent::EditSelected => self.state.open_edit_selected(),
            UiEvent::NewEntry => self.state.open_new_entry(),
            UiEvent::DeleteSelected => {
                if let Some(cmd) = self.state.delete_selected() {
                    self.dispatch(cmd);
                }
            }
            UiEvent::Sync => {
                let cmd = self.state.sync();
                self.dispatch(cmd);
            }

            // Dialog
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::SubmitDialog => {
                if let Some(cmd) = self.state.submit_dialog() {
                    self.dispatch(cmd);
                }
            }
            UiEvent::CancelDialog => self.state.close_dialog(),

            // Cosmetic
            UiEvent::ToggleTheme => self.state.toggle_theme(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissAlert => self.state.dismiss_alert(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    #[tokio::test]
    async fn test_mount_fetches_and_mutation_triggers_refresh() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(), net_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        let id = match net_cmd_rx.recv().await.unwrap() {
            NetworkCommand::ListRows { id } => id,
            other => panic!("expected initial list, got {:?}", other),
        };
        net_resp_tx
            .send(NetworkResponse::RowsLoaded {
                id,
                rows: vec![Row::new("42", "Ava", "10")],
            })
            .unwrap();

        // Wait until the fetched rows are applied
        while render_rx.recv().await.unwrap().rows.is_empty() {}

        ui_tx.send(UiEvent::DeleteSelected).unwrap();
        let (id, key) = match net_cmd_rx.recv().await.unwrap() {
            NetworkCommand::DeleteRow { id, key } => (id, key),
            other => panic!("expected delete, got {:?}", other),
        };
        assert_eq!(key, "42");

        net_resp_tx
            .send(NetworkResponse::RowDeleted { id, key })
            .unwrap();
        let refresh = net_cmd_rx.recv().await.unwrap();
        assert!(matches!(refresh, NetworkCommand::ListRows { .. }));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown));
        handle.await.unwrap();

        let mut last = None;
        while let Ok(state) = render_rx.try_recv() {
            last = Some(state);
        }
        let last = last.unwrap();
        assert_eq!(last.rows, vec![Row::new("42", "Ava", "10")]);
        assert!(last.notification.is_some());
    }
}
