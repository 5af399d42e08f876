//! Input row
//!
//! Name and message fields side by side, the focused one highlighted and
//! holding the cursor.

use relaychat_app::{App, Focus, InputField};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::sanitize;

const NAME_WIDTH: u16 = 20;
const MESSAGE_MIN_WIDTH: u16 = 10;
const BORDER: u16 = 1;

/// Render the input row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(NAME_WIDTH), Constraint::Min(MESSAGE_MIN_WIDTH)])
        .split(area);

    let [name_area, message_area] = chunks.as_ref() else {
        return;
    };

    let focus = app.focus();
    render_field(frame, " Name ", app.name_field(), focus == Focus::Name, *name_area);
    render_field(frame, " Message ", app.message_field(), focus == Focus::Message, *message_area);
}

fn render_field(frame: &mut Frame, title: &str, field: &InputField, focused: bool, area: Rect) {
    let border_style =
        if focused { Style::default().fg(Color::Yellow) } else { Style::default().fg(Color::DarkGray) };
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(title);

    // Scroll horizontally so the cursor stays inside the box
    let inner_width = usize::from(area.width.saturating_sub(2 * BORDER));
    let offset = field.cursor().saturating_sub(inner_width.saturating_sub(1));
    let visible: String = sanitize(field.value()).chars().skip(offset).take(inner_width).collect();

    let paragraph = Paragraph::new(visible).style(Style::default().fg(Color::White)).block(block);
    frame.render_widget(paragraph, area);

    if focused && inner_width > 0 {
        let cursor_offset = field.cursor().saturating_sub(offset) as u16;
        let cursor_x = area.x.saturating_add(BORDER).saturating_add(cursor_offset);
        let cursor_y = area.y.saturating_add(BORDER);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
