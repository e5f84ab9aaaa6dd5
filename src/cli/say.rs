//! TUI-less "say" command
//!
//! Drives a single send through the same state machine as the chat screen,
//! executing the backend calls inline instead of on background tasks.

use std::error::Error;

use crate::api::ChatBackend;
use crate::core::app::{apply_action, App, AppAction, AppActionContext, AppCommand, SendOutcome};
use crate::core::backend_service::execute;

/// Send `prompt` and return the assistant's reply text.
pub async fn run_say(
    backend: &dyn ChatBackend,
    prompt: Vec<String>,
    conversation: Option<String>,
) -> Result<String, Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("Usage: parlor say <message>".into());
    }

    let mut app = App::new(false);
    if let Some(id) = conversation {
        app.conversations.select(id);
    }

    let ctx = AppActionContext::default();
    let mut queue = apply_action(&mut app, AppAction::SubmitMessage { message: prompt }, ctx);

    while let Some(command) = queue.pop() {
        // List and thread reloads only matter to the chat screen.
        if !matches!(command, AppCommand::SendChat { .. }) {
            continue;
        }
        let action = execute(backend, command).await;
        queue.extend(apply_action(&mut app, action, ctx));
    }

    match app.last_outcome {
        Some(SendOutcome::Settled) => {
            let reply = app
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(reply)
        }
        Some(SendOutcome::Failed) => {
            let detail = app
                .notifications
                .latest()
                .map(|n| n.message.clone())
                .unwrap_or_else(|| "Failed to send message".to_string());
            Err(detail.into())
        }
        None => Err("No reply received".into()),
    }
}
