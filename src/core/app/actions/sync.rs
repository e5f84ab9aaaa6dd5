use serde_json::Value;
use tracing::{debug, error, warn};

use super::{App, AppAction, AppCommand};
use crate::api::ApiError;
use crate::core::app::Focus;
use crate::core::conversations::parse_conversation_list;
use crate::core::message::is_placeholder_id;
use crate::core::message_store::{extract_messages, MessageExtraction};

pub(super) fn handle_sync_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    match action {
        AppAction::RefreshConversations => vec![AppCommand::LoadConversations],
        AppAction::ConversationsLoaded { result } => {
            apply_conversation_list(app, result);
            Vec::new()
        }
        AppAction::SelectConversation { id } => select_conversation(app, id)
            .into_iter()
            .collect(),
        AppAction::NewChat => {
            start_new_chat(app);
            Vec::new()
        }
        AppAction::MessagesLoaded {
            conversation_id,
            result,
        } => {
            apply_loaded_messages(app, &conversation_id, result);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn apply_conversation_list(app: &mut App, result: Result<Value, ApiError>) {
    match result {
        Ok(body) => match parse_conversation_list(&body) {
            Some(conversations) => {
                debug!(count = conversations.len(), "Conversation list refreshed");
                app.conversations.replace(conversations);
                app.sync_sidebar_cursor();
            }
            None => warn!(body = %body, "Conversation list is not an array; keeping current list"),
        },
        Err(err) => {
            error!(error = %err, "Failed to load conversations");
            app.notifications
                .error(format!("Failed to load conversations: {}", err.user_message()));
        }
    }
}

/// Point the store at `id` and request its messages.
pub(super) fn select_conversation(app: &mut App, id: String) -> Option<AppCommand> {
    if !app.conversations.select(id.clone()) {
        return None;
    }
    app.messages.clear();
    app.ui.scroll.follow_latest();
    app.sync_sidebar_cursor();
    load_messages_command(&id)
}

/// Fetch command for `conversation_id`; blank and placeholder ids have nothing to fetch.
pub(super) fn load_messages_command(conversation_id: &str) -> Option<AppCommand> {
    if conversation_id.is_empty() || is_placeholder_id(conversation_id) {
        return None;
    }
    Some(AppCommand::LoadMessages {
        conversation_id: conversation_id.to_string(),
    })
}

pub(super) fn start_new_chat(app: &mut App) {
    let id = app.conversations.start_placeholder();
    debug!(placeholder = %id, "Started new chat");
    app.messages.clear();
    app.ui.scroll.follow_latest();
    app.sync_sidebar_cursor();
    app.ui.focus = Focus::Composer;
}

fn apply_loaded_messages(app: &mut App, conversation_id: &str, result: Result<Value, ApiError>) {
    if !app.conversations.is_active(conversation_id) {
        debug!(conversation_id, "Discarding messages for an inactive conversation");
        return;
    }

    match result {
        Ok(body) => match extract_messages(&body) {
            MessageExtraction::Messages(raw) => {
                app.messages.load(&raw);
                restore_pending_draft(app, conversation_id);
                app.ui.scroll.follow_latest();
            }
            MessageExtraction::MalformedShape => {
                warn!(conversation_id, body = %body, "Unexpected messages payload; keeping thread");
            }
        },
        Err(err) => {
            error!(conversation_id, error = %err, "Failed to load messages");
            app.messages.clear();
            restore_pending_draft(app, conversation_id);
            app.notifications.error(err.user_message());
        }
    }
}

/// Keep the optimistic message of a send started in `conversation_id`
/// visible after a load replaced or cleared the store.
fn restore_pending_draft(app: &mut App, conversation_id: &str) {
    let Some(draft) = app
        .pending_send()
        .filter(|pending| pending.origin.as_deref() == Some(conversation_id))
        .map(|pending| pending.draft.clone())
    else {
        return;
    };
    if !app.messages.messages().iter().any(|m| m.id == draft.id) {
        app.messages.push(draft);
    }
}
