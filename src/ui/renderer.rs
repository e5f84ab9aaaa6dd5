use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::app::{App, Focus, NotificationKind};
use crate::ui::sidebar::{render_sidebar, SIDEBAR_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::thread::{render_thread, wrap_text};

const MAX_COMPOSER_LINES: u16 = 6;
const FOOTER_TEXT: &str = "Replies may be inaccurate. Enter send · Alt+Enter newline · Tab focus · Ctrl+N new chat · Ctrl+C quit";
const NOTIFICATION_WIDTH: u16 = 48;

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = Theme::default();
    let area = f.area();

    let main_area = if app.ui.show_sidebar && area.width > SIDEBAR_WIDTH * 2 {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        render_sidebar(f, columns[0], app, &theme);
        columns[1]
    } else {
        area
    };

    let composer_lines = (app.composer.line_count() as u16).clamp(1, MAX_COMPOSER_LINES);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(composer_lines + 2),
            Constraint::Length(1),
        ])
        .split(main_area);

    render_thread(f, rows[0], app, &theme);
    render_composer(f, rows[1], app, &theme);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(FOOTER_TEXT, theme.footer_style))),
        rows[2],
    );
    render_notifications(f, rows[0], app, &theme);
}

fn render_composer(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let focused = app.ui.focus == Focus::Composer;
    let title = if app.is_sending() {
        Span::styled(" Waiting for reply… ", theme.busy_indicator_style)
    } else {
        Span::styled(" Message ", theme.title_style)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style
        } else {
            theme.border_style
        })
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.composer.set_focused(focused);
    f.render_widget(app.composer.textarea(), inner);
}

fn render_notifications(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let width = NOTIFICATION_WIDTH.min(area.width);
    let mut y = area.y;
    for notification in app.notifications.iter() {
        let style = match notification.kind {
            NotificationKind::Error => theme.notification_error_style,
            NotificationKind::Info => theme.notification_info_style,
        };
        let lines = wrap_text(&notification.message, width.saturating_sub(2) as usize);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);
        let paragraph = Paragraph::new(
            lines
                .into_iter()
                .map(|line| Line::from(format!(" {line}")))
                .collect::<Vec<_>>(),
        )
        .style(style);
        if y + height > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width),
            y,
            width,
            height,
        };
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
        y += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{PendingSend, SendPhase};
    use crate::core::conversations::Conversation;
    use crate::core::message::{Message, Role};
    use crate::ui::thread::EMPTY_THREAD_TEXT;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn empty_thread_shows_greeting_and_footer() {
        let mut app = App::new(true);
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains(EMPTY_THREAD_TEXT));
        assert!(screen.contains("Replies may be inaccurate."));
        assert!(screen.contains("Conversations"));
        assert!(screen.contains("+ New chat"));
    }

    #[test]
    fn sidebar_lists_conversations_and_can_be_hidden() {
        let mut app = App::new(true);
        app.conversations.replace(vec![Conversation {
            id: "1".into(),
            title: "Trip planning".into(),
            updated_at: String::new(),
        }]);
        assert!(render(&mut app, 120, 30).contains("Trip planning"));

        app.ui.toggle_sidebar();
        assert!(!render(&mut app, 120, 30).contains("Trip planning"));
    }

    #[test]
    fn messages_and_busy_state_are_rendered() {
        let mut app = App::new(false);
        app.messages.push(Message::new(
            "m1",
            Role::User,
            "What is Rust?",
            "2024-01-01T00:00:00.000Z",
        ));
        app.send_phase = SendPhase::Sending(PendingSend {
            draft: app.messages.messages()[0].clone(),
            origin: None,
        });

        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("What is Rust?"));
        assert!(screen.contains("Waiting for reply"));
        assert!(!screen.contains(EMPTY_THREAD_TEXT));
    }

    #[test]
    fn long_threads_follow_the_latest_message() {
        let mut app = App::new(false);
        for i in 0..30 {
            app.messages.push(Message::new(
                format!("m{i}"),
                Role::Assistant,
                format!("reply number {i}"),
                "2024-01-01T00:00:00.000Z",
            ));
        }

        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("reply number 29"));
        assert!(!screen.contains("reply number 0 "));
        assert!(app.ui.scroll.offset > 0);
        assert_eq!(app.ui.scroll.offset, app.ui.scroll.max_offset);
    }

    #[test]
    fn notifications_overlay_the_thread() {
        let mut app = App::new(false);
        app.notifications.error("Failed to load conversations: boom");
        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("Failed to load conversations: boom"));
    }
}
