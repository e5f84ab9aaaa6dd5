//! Maps terminal input to app actions.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::core::app::{App, AppAction};

const WHEEL_STEP: i32 = 3;

pub enum KeyResult {
    Dispatch(AppAction),
    /// Forward the key to the composer's text area.
    Edit,
    Newline,
    Ignored,
}

pub fn resolve_key(app: &App, key: &KeyEvent) -> KeyResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => return KeyResult::Dispatch(AppAction::Quit),
        KeyCode::Char('n') if ctrl => return KeyResult::Dispatch(AppAction::NewChat),
        KeyCode::Char('b') if ctrl => return KeyResult::Dispatch(AppAction::ToggleSidebar),
        KeyCode::Char('r') if ctrl => {
            return KeyResult::Dispatch(AppAction::RefreshConversations)
        }
        KeyCode::Tab | KeyCode::BackTab => return KeyResult::Dispatch(AppAction::ToggleFocus),
        KeyCode::PageUp => return KeyResult::Dispatch(AppAction::PageUp),
        KeyCode::PageDown => return KeyResult::Dispatch(AppAction::PageDown),
        _ => {}
    }

    if app.ui.is_sidebar_focused() {
        return match key.code {
            KeyCode::Up => KeyResult::Dispatch(AppAction::SidebarMoveUp),
            KeyCode::Down => KeyResult::Dispatch(AppAction::SidebarMoveDown),
            KeyCode::Enter => KeyResult::Dispatch(AppAction::SidebarActivate),
            KeyCode::Esc => KeyResult::Dispatch(AppAction::ToggleFocus),
            _ => KeyResult::Ignored,
        };
    }

    match key.code {
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
        {
            KeyResult::Newline
        }
        KeyCode::Enter => KeyResult::Dispatch(AppAction::SubmitComposer),
        _ => KeyResult::Edit,
    }
}

pub fn resolve_mouse(event: &MouseEvent) -> Option<AppAction> {
    match event.kind {
        MouseEventKind::ScrollUp => Some(AppAction::ScrollThread { lines: -WHEEL_STEP }),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollThread { lines: WHEEL_STEP }),
        _ => None,
    }
}

/// Normalize pasted text for the composer.
pub fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let without_cr = without_crlf.replace('\r', "\n");
    let expanded_tabs = without_cr.replace('\t', "    ");
    expanded_tabs
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}
