use ratatui::style::{Color, Modifier, Style};

/// Fixed palette for the chat screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,
    pub error_text_style: Style,
    pub timestamp_style: Style,

    pub title_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub sidebar_active_style: Style,
    pub sidebar_cursor_style: Style,
    pub sidebar_detail_style: Style,

    pub busy_indicator_style: Style,
    pub footer_style: Style,
    pub empty_state_style: Style,

    pub notification_error_style: Style,
    pub notification_info_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_prefix_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::White),
            error_text_style: Style::default().fg(Color::LightRed),
            timestamp_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default().fg(Color::Gray),
            border_style: Style::default().fg(Color::DarkGray),
            focused_border_style: Style::default().fg(Color::Cyan),
            sidebar_active_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            sidebar_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            sidebar_detail_style: Style::default().fg(Color::DarkGray),

            busy_indicator_style: Style::default().fg(Color::Yellow),
            footer_style: Style::default().fg(Color::DarkGray),
            empty_state_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            notification_error_style: Style::default().fg(Color::White).bg(Color::Red),
            notification_info_style: Style::default().fg(Color::Black).bg(Color::Cyan),
        }
    }
}
