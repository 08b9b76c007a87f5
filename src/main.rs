//! Sheetview - Actor-based spreadsheet CRUD client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async gateway calls

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use sheetview_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use sheetview_tui::messages::ui_events::{key_to_ui_event, InputMode};
use sheetview_tui::ui::{centered_rect, column_offset, render_input, render_notification, render_rows_table, Palette};
use sheetview_tui::{
    AppActor, AppState, Config, DraftField, EntryTarget, NetworkActor, NetworkCommand,
    NetworkResponse, RenderState, SheetClient, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    tracing::info!(endpoint = %config.endpoint, version = APP_VERSION, "Starting {}", APP_NAME);
    let client = SheetClient::new(&config.endpoint, config.timeout())?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::with_config(&config), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.alert.is_some(),
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let palette = Palette::for_mode(state.dark_mode);
    let area = f.area();

    f.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title + mode
            Constraint::Min(3),     // Table
            Constraint::Length(1),  // Notification
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, palette, chunks[0]);
    draw_table(f, state, palette, chunks[1]);

    if let Some(notification) = &state.notification {
        f.render_widget(render_notification(notification, palette), chunks[2]);
    }

    draw_status_bar(f, state, palette, chunks[3]);

    // Popups
    if let Some(target) = &state.dialog_target {
        draw_dialog(f, state, target, palette, area);
    }

    if state.show_help {
        draw_help_popup(f, palette, area);
    }

    if let Some(alert) = &state.alert {
        draw_alert_popup(f, alert, palette, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let mode = if state.dark_mode { "Dark" } else { "Light" };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(palette.primary).bold()),
        Span::styled(" s:Sync Data ", Style::default().fg(palette.foreground)),
        Span::styled(format!(" Mode: {} (t) ", mode), Style::default().fg(palette.muted)),
    ]);
    f.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn draw_table(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    if state.rows.is_empty() {
        let message = if state.is_loading {
            "Loading rows..."
        } else {
            "No rows. Press 'n' to add an entry or 's' to sync."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(palette.muted).bg(palette.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.primary))
                    .title(" Google Sheet Data "),
            );
        f.render_widget(empty, area);
        return;
    }

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected));
    f.render_stateful_widget(
        render_rows_table(&state.rows, palette, state.is_loading),
        area,
        &mut table_state,
    );
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let synced = state
        .last_synced
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| String::from("never"));

    let hints = match state.input_mode {
        InputMode::Editing => "Tab:next field | Enter:submit | Esc:cancel",
        InputMode::Normal => "↑/↓:select | e:edit | n:new | d:delete | s:sync | t:theme | ?:help | q:quit",
    };

    let status = format!(
        " {} rows | synced {}{} | {} ",
        state.rows.len(),
        synced,
        if state.is_loading { " | Loading..." } else { "" },
        hints
    );

    let bar = Paragraph::new(status)
        .style(Style::default().fg(palette.muted).bg(palette.background));
    f.render_widget(bar, area);
}

fn draw_dialog(f: &mut Frame, state: &RenderState, target: &EntryTarget, palette: Palette, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let (title, verb, action) = if target.is_new() {
        (" Add New Entry ", "add", "Create")
    } else {
        (" Edit Entry ", "edit", "Update")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .title(title)
        .style(palette.base());

    f.render_widget(Clear, popup_area);
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Prompt
            Constraint::Length(3),  // ID
            Constraint::Length(3),  // Avatar Name
            Constraint::Length(3),  // Performance Score
            Constraint::Min(1),     // Buttons
        ])
        .split(inner);

    let prompt = Paragraph::new(format!("Please fill out the form to {} an entry.", verb))
        .style(palette.base())
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[0]);

    for (field, chunk) in DraftField::ALL.iter().zip(chunks[1..4].iter()) {
        let is_focused = *field == state.dialog_focus;
        f.render_widget(
            render_input(state.draft.field(*field), field.label(), is_focused, palette),
            *chunk,
        );

        if is_focused && state.alert.is_none() {
            let prefix = &state.draft.field(*field)[..state.dialog_cursor.min(state.draft.field(*field).len())];
            let offset = column_offset(prefix);
            let max_x = chunk.x + chunk.width.saturating_sub(2);
            let cursor_x = (chunk.x + offset + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, chunk.y + 1));
        }
    }

    let buttons = Line::from(vec![
        Span::styled(" Esc:Cancel ", Style::default().fg(palette.primary)),
        Span::raw("  "),
        Span::styled(format!(" Enter:{} ", action), Style::default().fg(palette.background).bg(palette.primary).bold()),
    ])
    .right_aligned();
    f.render_widget(Paragraph::new(buttons).style(palette.base()), chunks[4]);
}

fn draw_help_popup(f: &mut Frame, palette: Palette, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 SHEETVIEW - Keyboard Shortcuts

 TABLE
   ↑ / ↓  (k / j)     Select row
   e / Enter          Edit selected row
   n                  Add new entry
   d                  Delete selected row
   s                  Sync data
   t                  Toggle light / dark mode

 DIALOG
   Tab / Shift+Tab    Next / previous field
   ← / →              Move cursor
   Enter              Create or update
   Esc                Cancel

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .title(" Help ")
        .style(palette.base());

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_alert_popup(f: &mut Frame, alert: &str, palette: Palette, area: Rect) {
    let popup_area = centered_rect(40, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.secondary))
        .title(" Alert (press any key) ")
        .style(palette.base());

    let message = Paragraph::new(alert)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(message, popup_area);
}
