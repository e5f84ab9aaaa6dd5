use ratatui::prelude::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Composer,
    Sidebar,
}

/// Scroll position of the message thread, in wrapped lines from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadScroll {
    pub offset: u16,
    pub max_offset: u16,
    /// Stick to the newest entry as messages arrive.
    pub follow: bool,
}

impl Default for ThreadScroll {
    fn default() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            follow: true,
        }
    }
}

impl ThreadScroll {
    pub fn follow_latest(&mut self) {
        self.follow = true;
        self.offset = self.max_offset;
    }

    pub fn scroll_by(&mut self, lines: i32) {
        let target = (self.offset as i32 + lines).clamp(0, self.max_offset as i32) as u16;
        self.offset = target;
        self.follow = target >= self.max_offset;
    }

    /// Record the latest layout; called by the renderer before drawing.
    pub fn update_bounds(&mut self, max_offset: u16) {
        self.max_offset = max_offset;
        if self.follow || self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

#[derive(Debug)]
pub struct UiState {
    pub focus: Focus,
    pub show_sidebar: bool,
    /// Highlighted sidebar row; row 0 is the new-chat entry.
    pub sidebar_cursor: usize,
    pub scroll: ThreadScroll,
    pub exit_requested: bool,
    pub last_term_size: Size,
}

impl UiState {
    pub fn new(show_sidebar: bool) -> Self {
        Self {
            focus: Focus::Composer,
            show_sidebar,
            sidebar_cursor: 0,
            scroll: ThreadScroll::default(),
            exit_requested: false,
            last_term_size: Size::default(),
        }
    }

    pub fn is_sidebar_focused(&self) -> bool {
        self.show_sidebar && self.focus == Focus::Sidebar
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Composer if self.show_sidebar => Focus::Sidebar,
            _ => Focus::Composer,
        };
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
        if !self.show_sidebar {
            self.focus = Focus::Composer;
        }
    }

    pub fn clamp_sidebar_cursor(&mut self, rows: usize) {
        self.sidebar_cursor = self.sidebar_cursor.min(rows.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_up_stops_following() {
        let mut scroll = ThreadScroll::default();
        scroll.update_bounds(20);
        assert_eq!(scroll.offset, 20);

        scroll.scroll_by(-5);
        assert_eq!(scroll.offset, 15);
        assert!(!scroll.follow);

        scroll.update_bounds(30);
        assert_eq!(scroll.offset, 15);

        scroll.scroll_by(100);
        assert_eq!(scroll.offset, 30);
        assert!(scroll.follow);
    }

    #[test]
    fn focus_skips_hidden_sidebar() {
        let mut ui = UiState::new(false);
        ui.toggle_focus();
        assert_eq!(ui.focus, Focus::Composer);

        ui.toggle_sidebar();
        ui.toggle_focus();
        assert!(ui.is_sidebar_focused());

        ui.toggle_sidebar();
        assert_eq!(ui.focus, Focus::Composer);
    }
}
