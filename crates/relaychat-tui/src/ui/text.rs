//! Text preparation for display.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use relaychat_client::Timestamp;
use unicode_width::UnicodeWidthChar;

/// Shown when a timestamp is outside the representable range.
const UNKNOWN_TIME: &str = "--:--:--";

/// Make untrusted text safe to draw.
///
/// Line breaks and tabs become spaces. Other control characters (including
/// ESC, which would start a terminal escape sequence) and invisible format
/// characters (bidi overrides and isolates, zero-width marks) become U+FFFD.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() || is_format(c) => char::REPLACEMENT_CHARACTER,
            c => c,
        })
        .collect()
}

/// Unicode general category `Cf`.
fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

/// Format a sender timestamp as `HH:MM:SS` in `tz`.
///
/// Fractional milliseconds are truncated. Values outside the range chrono can
/// represent show as `--:--:--`.
pub fn format_clock<Tz>(timestamp: &Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.as_millis().and_then(DateTime::from_timestamp_millis).map_or_else(
        || UNKNOWN_TIME.to_string(),
        |time| time.with_timezone(tz).format("%H:%M:%S").to_string(),
    )
}

/// Split a styled line into rows at most `width` columns wide.
///
/// Breaks after the last space that fits, or mid-word when a row has no
/// space. Styles are carried across breaks. A line always yields at least one
/// row.
pub fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<(char, Style)>> = Vec::new();
    let mut row: Vec<(char, Style)> = Vec::new();
    let mut row_width = 0;
    let mut break_at = None;

    for span in &line.spans {
        let style = line.style.patch(span.style);
        for c in span.content.chars() {
            let char_width = c.width().unwrap_or(0);
            if row_width + char_width > width && !row.is_empty() {
                let carried = match break_at.take() {
                    Some(at) => row.split_off(at),
                    None => Vec::new(),
                };
                rows.push(std::mem::replace(&mut row, carried));
                row_width = row.iter().map(|(c, _)| c.width().unwrap_or(0)).sum();
            }
            row.push((c, style));
            row_width += char_width;
            if c == ' ' {
                break_at = Some(row.len());
            }
        }
    }
    rows.push(row);

    rows.into_iter().map(|cells| row_to_line(&cells)).collect()
}

fn row_to_line(cells: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style = None;

    for &(c, style) in cells {
        if let Some(previous) = current_style
            && previous != style
        {
            spans.push(Span::styled(std::mem::take(&mut current), previous));
        }
        current_style = Some(style);
        current.push(c);
    }
    if let Some(style) = current_style {
        spans.push(Span::styled(current, style));
    }

    Line::from(spans)
}
