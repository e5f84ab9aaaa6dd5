//! Message thread with follow-the-latest scrolling.
//!
//! Lines are wrapped here rather than by `Paragraph`, so the renderer knows
//! the exact line count and can keep the newest message in view.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::app::App;
use crate::core::message::{Message, Role};
use crate::ui::theme::Theme;

pub const EMPTY_THREAD_TEXT: &str = "How can I help you today?";
const BUSY_TEXT: &str = "Assistant is thinking…";
const CONTENT_INDENT: &str = "  ";
const NEW_CHAT_TITLE: &str = "New chat";

/// Word-wrap `text` to `width` columns. Words wider than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split(' ') {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());
            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        lines.push(current);
    }

    lines
}

fn format_time(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|parsed| parsed.with_timezone(&Local).format("%H:%M").to_string())
}

fn is_error_notice(message: &Message) -> bool {
    message.role == Role::Assistant && message.id.starts_with("error-")
}

/// Build the wrapped display lines for `messages` at `width` columns.
pub fn build_thread_lines(
    messages: &[Message],
    width: u16,
    busy: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let content_width = (width as usize).saturating_sub(CONTENT_INDENT.width());
    let mut lines = Vec::new();

    for message in messages {
        let (label, label_style, text_style) = match message.role {
            Role::User => ("You", theme.user_prefix_style, theme.user_text_style),
            Role::Assistant if is_error_notice(message) => (
                "Assistant",
                theme.assistant_prefix_style,
                theme.error_text_style,
            ),
            Role::Assistant => (
                "Assistant",
                theme.assistant_prefix_style,
                theme.assistant_text_style,
            ),
        };

        let mut header = vec![Span::styled(label, label_style)];
        if let Some(time) = format_time(&message.timestamp) {
            header.push(Span::styled(format!("  {time}"), theme.timestamp_style));
        }
        lines.push(Line::from(header));

        for line in wrap_text(&message.content, content_width) {
            lines.push(indented(line, text_style));
        }
        lines.push(Line::default());
    }

    if busy {
        lines.push(Line::from(Span::styled(BUSY_TEXT, theme.busy_indicator_style)));
    }

    lines
}

fn indented(text: String, style: Style) -> Line<'static> {
    Line::from(vec![Span::raw(CONTENT_INDENT), Span::styled(text, style)])
}

pub fn thread_title(app: &App) -> String {
    app.conversations
        .active_title()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(NEW_CHAT_TITLE)
        .to_string()
}

pub fn render_thread(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let block = Block::default().title(Span::styled(
        format!(" {} ", thread_title(app)),
        theme.title_style,
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.messages.is_empty() && !app.is_sending() {
        app.ui.scroll.update_bounds(0);
        let empty = Paragraph::new(Line::from(Span::styled(
            EMPTY_THREAD_TEXT,
            theme.empty_state_style,
        )))
        .centered();
        let middle = Rect {
            y: inner.y + inner.height / 2,
            height: inner.height.min(1),
            ..inner
        };
        f.render_widget(empty, middle);
        return;
    }

    let lines = build_thread_lines(app.messages.messages(), inner.width, app.is_sending(), theme);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    app.ui.scroll.update_bounds(total.saturating_sub(inner.height));

    let paragraph = Paragraph::new(lines).scroll((app.ui.scroll.offset, 0));
    f.render_widget(paragraph, inner);
}
