use super::sync::{select_conversation, start_new_chat};
use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::app::SidebarEntry;

/// Rows outside the thread: composer, footer and borders.
const THREAD_CHROME_ROWS: u16 = 7;

pub(super) fn handle_input_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Vec<AppCommand> {
    match action {
        AppAction::ToggleFocus => app.ui.toggle_focus(),
        AppAction::ToggleSidebar => app.ui.toggle_sidebar(),
        AppAction::SidebarMoveUp => {
            app.ui.sidebar_cursor = app.ui.sidebar_cursor.saturating_sub(1);
        }
        AppAction::SidebarMoveDown => {
            app.ui.sidebar_cursor = app.ui.sidebar_cursor.saturating_add(1);
            app.ui.clamp_sidebar_cursor(app.sidebar_rows());
        }
        AppAction::SidebarActivate => match app.sidebar_selection() {
            Some(SidebarEntry::NewChat) => start_new_chat(app),
            Some(SidebarEntry::Conversation(id)) => {
                let id = id.to_owned();
                return select_conversation(app, id).into_iter().collect();
            }
            None => {}
        },
        AppAction::ScrollThread { lines } => app.ui.scroll.scroll_by(lines),
        AppAction::PageUp => app.ui.scroll.scroll_by(-(page_height(ctx) as i32)),
        AppAction::PageDown => app.ui.scroll.scroll_by(page_height(ctx) as i32),
        AppAction::InsertIntoComposer { text } => {
            if !text.is_empty() {
                app.composer.insert_str(&text);
            }
        }
        AppAction::Quit => app.ui.exit_requested = true,
        _ => {}
    }
    Vec::new()
}

fn page_height(ctx: AppActionContext) -> u16 {
    ctx.term_height.saturating_sub(THREAD_CHROME_ROWS).max(1)
}
