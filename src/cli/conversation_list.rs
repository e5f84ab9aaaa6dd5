//! `conversations` and `messages` subcommands.

use std::error::Error;

use crate::api::ChatBackend;
use crate::core::conversations::{parse_conversation_list, Conversation};
use crate::core::message::Message;
use crate::core::message_store::{extract_messages, normalize_message, MessageExtraction};
use crate::ui::sidebar::format_updated_at;

pub async fn list_conversations(backend: &dyn ChatBackend) -> Result<(), Box<dyn Error>> {
    let body = backend.list_conversations().await?;
    let conversations = parse_conversation_list(&body)
        .ok_or("Unexpected response from /api/conversations: expected an array")?;

    if conversations.is_empty() {
        println!("No conversations yet. Start one with 'parlor' or 'parlor say <message>'.");
        return Ok(());
    }

    println!("Conversations:");
    for line in conversation_lines(&conversations) {
        println!("{line}");
    }
    Ok(())
}

pub async fn print_messages(
    backend: &dyn ChatBackend,
    conversation_id: &str,
) -> Result<(), Box<dyn Error>> {
    let body = backend.conversation_messages(conversation_id).await?;
    let raw = match extract_messages(&body) {
        MessageExtraction::Messages(raw) => raw,
        MessageExtraction::MalformedShape => {
            return Err(format!("Unexpected message payload for conversation {conversation_id}").into())
        }
    };

    let messages: Vec<Message> = raw.iter().map(normalize_message).collect();
    if messages.is_empty() {
        println!("Conversation {conversation_id} has no messages.");
        return Ok(());
    }
    for line in message_lines(&messages) {
        println!("{line}");
    }
    Ok(())
}

fn conversation_lines(conversations: &[Conversation]) -> Vec<String> {
    let id_width = conversations
        .iter()
        .map(|c| c.id.chars().count())
        .max()
        .unwrap_or(0);

    conversations
        .iter()
        .map(|c| {
            let title = if c.title.trim().is_empty() {
                "Untitled"
            } else {
                c.title.as_str()
            };
            let updated = format_updated_at(&c.updated_at);
            if updated.is_empty() {
                format!("  {:<id_width$}  {title}", c.id)
            } else {
                format!("  {:<id_width$}  {title} ({updated})", c.id)
            }
        })
        .collect()
}

fn message_lines(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .map(|m| format!("[{}] {}", m.role.as_str(), m.content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    #[test]
    fn conversation_ids_are_aligned() {
        let conversations = vec![
            Conversation {
                id: "7".into(),
                title: "Short".into(),
                updated_at: String::new(),
            },
            Conversation {
                id: "conv-42".into(),
                title: "  ".into(),
                updated_at: String::new(),
            },
        ];

        assert_eq!(
            conversation_lines(&conversations),
            vec!["  7        Short", "  conv-42  Untitled"]
        );
    }

    #[test]
    fn messages_are_prefixed_with_role() {
        let messages = vec![
            Message::new("1", Role::User, "Hi", "t"),
            Message::new("2", Role::Assistant, "Hello!", "t"),
        ];
        assert_eq!(
            message_lines(&messages),
            vec!["[user] Hi", "[assistant] Hello!"]
        );
    }
}
