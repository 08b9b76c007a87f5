use ratatui::{prelude::*, widgets::*};
use ratatui::widgets::Row as TableRow;
use unicode_width::UnicodeWidthStr;

use crate::app::state::{Notification, NotificationKind};
use crate::models::Row;

const TABLE_HEADERS: [&str; 4] = ["ID", "Avatar Name", "Performance Score", "Actions"];

/// Colours for one theme mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    /// Edit actions, focus, success
    pub primary: Color,
    /// Delete actions, errors
    pub secondary: Color,
}

impl Palette {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Palette {
                background: Color::Rgb(18, 18, 18),
                foreground: Color::White,
                muted: Color::Gray,
                primary: Color::Rgb(0x4c, 0xaf, 0x50),
                secondary: Color::Rgb(0xf4, 0x43, 0x36),
            }
        } else {
            Palette {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::DarkGray,
                primary: Color::Rgb(0x38, 0x8e, 0x3c),
                secondary: Color::Rgb(0xd3, 0x2f, 0x2f),
            }
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }
}

/// Renders a labelled text input field
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool, palette: Palette) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(palette.primary)
    } else {
        Style::default().fg(palette.muted)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", title));

    Paragraph::new(content).block(block).style(palette.base())
}

/// Renders the row collection as a table
pub fn render_rows_table<'a>(rows: &'a [Row], palette: Palette, is_loading: bool) -> Table<'a> {
    let header = TableRow::new(
        TABLE_HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(palette.foreground).bold())),
    )
    .height(1)
    .bottom_margin(1);

    let body = rows.iter().map(|row| {
        TableRow::new(vec![
            Cell::from(row.id.as_str()),
            Cell::from(row.avatar_name.as_str()),
            Cell::from(row.performance_score.as_str()),
            Cell::from(Line::from(vec![
                Span::styled("e:Edit", Style::default().fg(palette.primary)),
                Span::raw("  "),
                Span::styled("d:Delete", Style::default().fg(palette.secondary)),
            ])),
        ])
    });

    let title = if is_loading { " Google Sheet Data [...] " } else { " Google Sheet Data " };

    Table::new(
        body,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary))
            .title(title),
    )
    .style(palette.base())
    .row_highlight_style(Style::default().fg(palette.background).bg(palette.primary).bold())
    .highlight_symbol("> ")
}

/// Renders the transient notification line
pub fn render_notification<'a>(notification: &'a Notification, palette: Palette) -> Paragraph<'a> {
    let colour = match notification.kind {
        NotificationKind::Success => palette.primary,
        NotificationKind::Error => palette.secondary,
    };
    Paragraph::new(format!(" {} ", notification.message))
        .style(Style::default().fg(Color::White).bg(colour).bold())
}

/// Terminal columns taken by the text before the cursor
pub fn column_offset(text: &str) -> u16 {
    text.width().min(u16::MAX as usize) as u16
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_palettes_differ_only_in_colour() {
        let light = Palette::for_mode(false);
        let dark = Palette::for_mode(true);
        assert_ne!(light, dark);
        assert_eq!(dark.primary, Color::Rgb(0x4c, 0xaf, 0x50));
        assert_eq!(light.secondary, Color::Rgb(0xd3, 0x2f, 0x2f));
    }

    #[test]
    fn test_table_shows_rows() {
        let rows = vec![Row::new("1", "Ava", "10"), Row::new("2", "Bea", "15")];
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| {
                let mut state = TableState::default().with_selected(Some(1));
                f.render_stateful_widget(
                    render_rows_table(&rows, Palette::for_mode(false), false),
                    f.area(),
                    &mut state,
                );
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Avatar Name"));
        assert!(text.contains("Ava"));
        assert!(text.contains("Bea"));
        assert!(text.contains('>'));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }

    #[test]
    fn test_column_offset_counts_display_width() {
        assert_eq!(column_offset(""), 0);
        assert_eq!(column_offset("Ava"), 3);
        assert_eq!(column_offset("é"), 1);
        assert_eq!(column_offset("日本"), 4);
        assert_eq!(column_offset("a日b"), 4);
    }
}
