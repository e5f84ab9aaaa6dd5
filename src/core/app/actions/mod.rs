mod input;
mod send;
mod sync;

use serde_json::Value;
use tokio::sync::mpsc;

use super::App;
use crate::api::{ApiError, ChatRequest};

pub enum AppAction {
    RefreshConversations,
    ConversationsLoaded {
        result: Result<Value, ApiError>,
    },
    SelectConversation {
        id: String,
    },
    NewChat,
    MessagesLoaded {
        conversation_id: String,
        result: Result<Value, ApiError>,
    },
    SubmitComposer,
    SubmitMessage {
        message: String,
    },
    ChatCompleted {
        temp_id: String,
        result: Result<Value, ApiError>,
    },
    ToggleFocus,
    ToggleSidebar,
    SidebarMoveUp,
    SidebarMoveDown,
    SidebarActivate,
    ScrollThread {
        lines: i32,
    },
    PageUp,
    PageDown,
    InsertIntoComposer {
        text: String,
    },
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction, ctx: AppActionContext) {
        self.dispatch_many([action], ctx);
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Backend work requested by an action.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    LoadConversations,
    LoadMessages { conversation_id: String },
    SendChat { temp_id: String, request: ChatRequest },
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        commands.extend(apply_action(app, envelope.action, envelope.context));
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Vec<AppCommand> {
    match action {
        AppAction::RefreshConversations
        | AppAction::ConversationsLoaded { .. }
        | AppAction::SelectConversation { .. }
        | AppAction::NewChat
        | AppAction::MessagesLoaded { .. } => sync::handle_sync_action(app, action),

        AppAction::SubmitComposer
        | AppAction::SubmitMessage { .. }
        | AppAction::ChatCompleted { .. } => send::handle_send_action(app, action),

        AppAction::ToggleFocus
        | AppAction::ToggleSidebar
        | AppAction::SidebarMoveUp
        | AppAction::SidebarMoveDown
        | AppAction::SidebarActivate
        | AppAction::ScrollThread { .. }
        | AppAction::PageUp
        | AppAction::PageDown
        | AppAction::InsertIntoComposer { .. }
        | AppAction::Quit => input::handle_input_action(app, action, ctx),
    }
}
