//! Multi-line message input with a submit guard.

use ratatui::crossterm::event::KeyEvent;
use ratatui::style::{Modifier, Style};
use tui_textarea::{Input, TextArea};

const PLACEHOLDER: &str = "Type your message...";

fn empty_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(PLACEHOLDER);
    textarea.set_cursor_line_style(Style::default());
    textarea
}

pub struct Composer {
    textarea: TextArea<'static>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            textarea: empty_textarea(),
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.textarea.lines().iter().all(|line| line.trim().is_empty())
    }

    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.textarea.insert_str(text);
    }

    pub fn clear(&mut self) {
        self.textarea = empty_textarea();
    }

    /// Show the block cursor only while the composer has focus.
    pub fn set_focused(&mut self, focused: bool) {
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(style);
    }

    pub fn insert_newline(&mut self) {
        self.textarea.insert_newline();
    }

    pub fn insert_str(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    /// Forward an editing key. Returns `true` when the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(Input::from(key))
    }

    /// Take the current text for sending.
    ///
    /// Returns `None` and leaves the text untouched when it is blank or
    /// `busy` is set; otherwise clears the field.
    pub fn take_submission(&mut self, busy: bool) -> Option<String> {
        if busy || self.is_blank() {
            return None;
        }
        let text = self.text();
        self.clear();
        Some(text)
    }
}
