//! Conversation list.

use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::ui::theme::Theme;

pub const SIDEBAR_WIDTH: u16 = 32;
const NEW_CHAT_LABEL: &str = "+ New chat";
const UNTITLED: &str = "Untitled";
const ACTIVE_MARKER: &str = "● ";
const INACTIVE_MARKER: &str = "  ";

/// Cut `text` to at most `max_width` columns, ending with `…` when shortened.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for grapheme in text.graphemes(true) {
        let width = grapheme.width();
        if used + width > budget {
            break;
        }
        used += width;
        out.push_str(grapheme);
    }
    out.push('…');
    out
}

/// Render a backend `updated_at` in local time; unparsable values are shown as-is.
pub fn format_updated_at(updated_at: &str) -> String {
    if updated_at.is_empty() {
        return String::new();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(updated_at) {
        return parsed
            .with_timezone(&Local)
            .format("%b %d, %H:%M")
            .to_string();
    }
    // The backend also emits naive ISO timestamps without an offset.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(updated_at, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%b %d, %H:%M").to_string();
    }
    updated_at.to_string()
}

pub fn render_sidebar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.ui.is_sidebar_focused();
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(Span::styled(" Conversations ", theme.title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text_width = (inner.width as usize).saturating_sub(ACTIVE_MARKER.width());
    let mut items = Vec::with_capacity(app.conversations.len() + 1);

    let placeholder_active =
        app.conversations.active_is_placeholder() || app.conversations.active_id().is_none();
    let new_chat_style = if placeholder_active {
        theme.sidebar_active_style
    } else {
        theme.sidebar_detail_style
    };
    items.push(ListItem::new(Line::from(Span::styled(
        truncate_to_width(NEW_CHAT_LABEL, inner.width as usize),
        new_chat_style,
    ))));

    for conversation in app.conversations.conversations() {
        let active = app.conversations.is_active(&conversation.id);
        let title = if conversation.title.trim().is_empty() {
            UNTITLED
        } else {
            conversation.title.as_str()
        };
        let marker = if active { ACTIVE_MARKER } else { INACTIVE_MARKER };
        let title_style = if active {
            theme.sidebar_active_style
        } else {
            theme.assistant_text_style
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(marker, theme.sidebar_active_style),
                Span::styled(truncate_to_width(title, text_width), title_style),
            ]),
            Line::from(vec![
                Span::raw(INACTIVE_MARKER),
                Span::styled(
                    truncate_to_width(&format_updated_at(&conversation.updated_at), text_width),
                    theme.sidebar_detail_style,
                ),
            ]),
        ];
        items.push(ListItem::new(lines));
    }

    let mut list = List::new(items);
    if focused {
        list = list.highlight_style(theme.sidebar_cursor_style);
    }
    let mut state = ListState::default().with_selected(Some(app.ui.sidebar_cursor));
    f.render_stateful_widget(list, inner, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer title", 8), "a longe…");
        assert_eq!(truncate_to_width("日本語のタイトル", 7), "日本語…");
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn naive_timestamps_are_formatted() {
        assert_eq!(format_updated_at("2024-01-05T13:45:00.123456"), "Jan 05, 13:45");
        assert_eq!(format_updated_at("not a date"), "not a date");
        assert_eq!(format_updated_at(""), "");
    }
}
