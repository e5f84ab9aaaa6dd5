//! Ordered messages of the active conversation.

use serde_json::Value;

use crate::api::json_id;
use crate::core::message::{generated_message_id, now_timestamp, Message, Role};

/// Outcome of locating the message array inside a `/messages` body.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageExtraction {
    Messages(Vec<Value>),
    MalformedShape,
}

/// Accepts a bare array, `{messages: [...]}` or `{conversation: {messages: [...]}}`.
pub fn extract_messages(body: &Value) -> MessageExtraction {
    let candidates = [
        Some(body),
        body.get("messages"),
        body.get("conversation").and_then(|c| c.get("messages")),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_array)
        .map(|items| MessageExtraction::Messages(items.clone()))
        .unwrap_or(MessageExtraction::MalformedShape)
}

/// Fill in whatever the backend left out of a raw message.
pub fn normalize_message(raw: &Value) -> Message {
    let id = raw
        .get("id")
        .and_then(json_id)
        .unwrap_or_else(generated_message_id);
    let content = ["content", "message"]
        .iter()
        .filter_map(|field| raw.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default();
    let role = raw
        .get("role")
        .and_then(Value::as_str)
        .and_then(|role| Role::try_from(role).ok())
        .unwrap_or(Role::Assistant);
    let timestamp = raw
        .get("timestamp")
        .and_then(Value::as_str)
        .filter(|ts| !ts.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(now_timestamp);

    Message::new(id, role, content, timestamp)
}

/// Replace the entry whose id is `temp_id` and whose content equals
/// `match_content` with `confirmed`; append `confirmed` when nothing matches.
pub fn reconcile(
    mut messages: Vec<Message>,
    temp_id: &str,
    match_content: &str,
    confirmed: Message,
) -> Vec<Message> {
    match messages
        .iter()
        .position(|m| m.id == temp_id && m.content == match_content)
    {
        Some(index) => messages[index] = confirmed,
        None => messages.push(confirmed),
    }
    messages
}

#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace the contents with the normalized form of `raw`.
    pub fn load(&mut self, raw: &[Value]) {
        self.messages = raw.iter().map(normalize_message).collect();
    }

    pub fn reconcile(&mut self, temp_id: &str, match_content: &str, confirmed: Message) {
        let messages = std::mem::take(&mut self.messages);
        self.messages = reconcile(messages, temp_id, match_content, confirmed);
    }
}
