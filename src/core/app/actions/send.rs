//! Send orchestration: optimistic insert, backend call, reconciliation.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::sync::load_messages_command;
use super::{App, AppAction, AppCommand};
use crate::api::{ApiError, ChatReply, ChatRequest};
use crate::core::app::{PendingSend, SendOutcome, SendPhase};
use crate::core::message::{generated_message_id, is_placeholder_id, now_timestamp, Message, Role};

pub(super) fn handle_send_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    match action {
        AppAction::SubmitComposer => {
            let busy = app.is_sending();
            match app.composer.take_submission(busy) {
                Some(message) => begin_send(app, message).into_iter().collect(),
                None => Vec::new(),
            }
        }
        AppAction::SubmitMessage { message } => begin_send(app, message).into_iter().collect(),
        AppAction::ChatCompleted { temp_id, result } => complete_send(app, &temp_id, result),
        _ => Vec::new(),
    }
}

/// `Idle -> Sending`: insert the optimistic user message and request the reply.
pub(super) fn begin_send(app: &mut App, message: String) -> Option<AppCommand> {
    if message.trim().is_empty() {
        return None;
    }
    if app.is_sending() {
        debug!("Dropping submission while a reply is pending");
        return None;
    }

    let draft = Message::user_draft(message.clone());
    let temp_id = draft.id.clone();
    let request = ChatRequest {
        message,
        conversation_id: app.conversations.backend_conversation_id(),
    };

    app.messages.push(draft.clone());
    app.ui.scroll.follow_latest();
    app.send_phase = SendPhase::Sending(PendingSend {
        draft,
        origin: app.conversations.active_id().map(str::to_owned),
    });

    Some(AppCommand::SendChat { temp_id, request })
}

fn complete_send(app: &mut App, temp_id: &str, result: Result<Value, ApiError>) -> Vec<AppCommand> {
    let Some(pending) = app.take_pending(temp_id) else {
        debug!(temp_id, "Ignoring reply for a send that is no longer pending");
        return Vec::new();
    };

    let reply = result
        .map_err(|err| err.user_message())
        .and_then(ChatReply::from_value);
    let on_origin = app.conversations.active_id() == pending.origin.as_deref();

    match reply {
        Ok(reply) => {
            app.last_outcome = Some(SendOutcome::Settled);
            if !on_origin {
                info!(temp_id, "Reply arrived after switching conversations; thread left as is");
                return vec![AppCommand::LoadConversations];
            }
            settle(app, pending, reply)
        }
        Err(description) => {
            app.last_outcome = Some(SendOutcome::Failed);
            error!(temp_id, error = %description, "Chat request failed");
            if on_origin {
                app.messages.push(Message::error_notice(&description));
                app.ui.scroll.follow_latest();
            }
            app.notifications.error(description);
            Vec::new()
        }
    }
}

fn settle(app: &mut App, pending: PendingSend, reply: ChatReply) -> Vec<AppCommand> {
    let PendingSend { draft, .. } = pending;
    let ChatReply {
        content,
        id,
        message_id,
        conversation_id,
        timestamp,
    } = reply;

    let confirmed = match message_id {
        Some(message_id) => draft.with_id(message_id),
        None => draft.clone(),
    };
    app.messages.reconcile(&draft.id, &draft.content, confirmed);
    app.messages.push(Message::new(
        id.unwrap_or_else(generated_message_id),
        Role::Assistant,
        content,
        timestamp.unwrap_or_else(now_timestamp),
    ));
    app.ui.scroll.follow_latest();

    let mut commands = Vec::new();
    if let Some(conversation_id) = conversation_id {
        if !app.conversations.is_active(&conversation_id) {
            commands.extend(adopt_conversation(app, conversation_id));
        }
    }
    commands.insert(0, AppCommand::LoadConversations);
    commands
}

/// Follow the backend's conversation id.
///
/// A placeholder (or no selection) simply becomes durable. When a durable
/// conversation was active, the thread is reloaded for the new id so the
/// store keeps matching the pointer.
fn adopt_conversation(app: &mut App, conversation_id: String) -> Option<AppCommand> {
    let previous = app.conversations.adopt_backend_id(conversation_id.clone());
    app.sync_sidebar_cursor();
    match previous {
        Some(previous) if !is_placeholder_id(&previous) => {
            warn!(
                previous = %previous,
                current = %conversation_id,
                "Backend answered in a different conversation; switching"
            );
            app.messages.clear();
            load_messages_command(&conversation_id)
        }
        _ => None,
    }
}
