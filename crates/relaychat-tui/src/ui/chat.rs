//! Chat area
//!
//! Displays the conversation log, newest lines at the bottom.

use chrono::Local;
use relaychat_app::{App, LogEntry};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::{format_clock, sanitize, wrap_line};

const BORDER_SIZE: u16 = 2;
const TYPING_MARKER: &str = " typing... ";

/// Render the chat area.
///
/// Entries are wrapped to the inner width and the view is pinned to the last
/// wrapped row.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Relaychat ");

    let lines: Vec<Line<'static>> = if app.log().is_empty() {
        vec![Line::from(Span::styled("No messages yet", Style::default().fg(Color::DarkGray)))]
    } else {
        app.log().entries().iter().map(entry_line).collect()
    };

    let inner_width = area.width.saturating_sub(BORDER_SIZE) as usize;
    let rows: Vec<Line<'static>> =
        lines.iter().flat_map(|line| wrap_line(line, inner_width)).collect();

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = rows.len().saturating_sub(visible_height);
    let visible_items: Vec<ListItem> = rows.into_iter().skip(skip).map(ListItem::new).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

fn entry_line(entry: &LogEntry) -> Line<'static> {
    match entry {
        LogEntry::Notice { text } => Line::from(Span::styled(
            format!("-- {} --", sanitize(text)),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        LogEntry::Message { username, text, timestamp } => Line::from(vec![
            Span::styled(
                format!("[{}] ", format_clock(timestamp, &Local)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("<{}>", sanitize(username)),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(sanitize(text)),
        ]),
        LogEntry::Typing { username, text } => Line::from(vec![
            Span::styled(sanitize(username), Style::default().fg(Color::Yellow)),
            Span::styled(
                TYPING_MARKER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
            Span::styled(sanitize(text), Style::default().add_modifier(Modifier::ITALIC)),
        ]),
    }
}
