//! Wire types and HTTP plumbing for the chat backend.
//!
//! The backend exposes three endpoints: the conversation list, the messages
//! of one conversation, and the chat endpoint that accepts a user message and
//! answers with the assistant reply. Responses are handled as raw JSON here;
//! shape recognition lives next to the stores in [`crate::core`].

pub mod client;
pub mod error;

use serde::Serialize;
use serde_json::Value;

use crate::utils::url::encode_path_segment;

pub use client::{ApiClient, ChatBackend, RequestLogger, TracingRequestLogger, REQUEST_TIMEOUT};
pub use error::ApiError;

pub const CONVERSATIONS_PATH: &str = "api/conversations";
pub const CHAT_PATH: &str = "api/chat";

const EMPTY_REPLY: &str = "Empty response from server";

pub fn conversation_messages_path(conversation_id: &str) -> String {
    format!(
        "{CONVERSATIONS_PATH}/{}/messages",
        encode_path_segment(conversation_id)
    )
}

/// Body of `POST /api/chat`.
///
/// `conversation_id` is serialized as `null` when the message starts a new
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
}

/// Reply of `POST /api/chat` after lenient decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub content: String,
    /// Backend id of the assistant message, if any.
    pub id: Option<String>,
    /// Backend id assigned to the user's message.
    pub message_id: Option<String>,
    pub conversation_id: Option<String>,
    pub timestamp: Option<String>,
}

impl ChatReply {
    /// Decode a chat reply.
    ///
    /// Accepts a bare string, or an object carrying `content` or `response`.
    /// Objects with neither are rendered as their JSON text. `null`, `false`,
    /// `0` and an empty string are rejected.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null | Value::Bool(false) => Err(EMPTY_REPLY.to_string()),
            Value::Number(ref number) if number.as_f64() == Some(0.0) => {
                Err(EMPTY_REPLY.to_string())
            }
            Value::String(text) if text.is_empty() => Err(EMPTY_REPLY.to_string()),
            Value::String(text) => Ok(Self::plain(text)),
            Value::Object(ref map) => {
                let content = ["content", "response"]
                    .iter()
                    .find_map(|field| {
                        map.get(*field)
                            .and_then(Value::as_str)
                            .filter(|text| !text.is_empty())
                            .map(str::to_owned)
                    })
                    .unwrap_or_else(|| value.to_string());
                Ok(Self {
                    content,
                    id: map.get("id").and_then(json_id),
                    message_id: map.get("message_id").and_then(json_id),
                    conversation_id: map.get("conversation_id").and_then(json_id),
                    timestamp: map
                        .get("timestamp")
                        .and_then(Value::as_str)
                        .filter(|ts| !ts.is_empty())
                        .map(str::to_owned),
                })
            }
            other => Ok(Self::plain(other.to_string())),
        }
    }

    fn plain(content: String) -> Self {
        Self {
            content,
            id: None,
            message_id: None,
            conversation_id: None,
            timestamp: None,
        }
    }
}

/// Read an identifier that the backend may send as a string or a number.
pub fn json_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_serializes_missing_conversation_as_null() {
        let request = ChatRequest {
            message: "hello".to_string(),
            conversation_id: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"message": "hello", "conversation_id": null})
        );
    }

    #[test]
    fn messages_path_encodes_the_conversation_id() {
        assert_eq!(
            conversation_messages_path("conv-42"),
            "api/conversations/conv-42/messages"
        );
        assert_eq!(
            conversation_messages_path("a/b c"),
            "api/conversations/a%2Fb%20c/messages"
        );
    }

    #[test]
    fn reply_accepts_bare_string() {
        let reply = ChatReply::from_value(json!("just text")).unwrap();
        assert_eq!(reply.content, "just text");
        assert_eq!(reply.conversation_id, None);
    }

    #[test]
    fn reply_prefers_content_then_response() {
        let reply = ChatReply::from_value(json!({
            "content": "from content",
            "response": "from response",
            "conversation_id": "conv-1",
            "message_id": 3
        }))
        .unwrap();
        assert_eq!(reply.content, "from content");
        assert_eq!(reply.conversation_id.as_deref(), Some("conv-1"));
        assert_eq!(reply.message_id.as_deref(), Some("3"));

        let reply = ChatReply::from_value(json!({
            "response": "from response",
            "timestamp": "2024-05-01T10:00:00"
        }))
        .unwrap();
        assert_eq!(reply.content, "from response");
        assert_eq!(reply.timestamp.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn reply_without_text_fields_is_rendered_as_json() {
        let reply = ChatReply::from_value(json!({"conversation_id": "c"})).unwrap();
        assert_eq!(reply.content, r#"{"conversation_id":"c"}"#);
    }

    #[test]
    fn reply_rejects_empty_payloads() {
        assert!(ChatReply::from_value(Value::Null).is_err());
        assert!(ChatReply::from_value(json!("")).is_err());
    }

    #[test]
    fn reply_rejects_falsy_scalars() {
        for value in [json!(false), json!(0), json!(0.0)] {
            assert_eq!(
                ChatReply::from_value(value.clone()),
                Err("Empty response from server".to_string()),
                "{value}"
            );
        }
        assert_eq!(ChatReply::from_value(json!(7)).unwrap().content, "7");
        assert_eq!(ChatReply::from_value(json!(true)).unwrap().content, "true");
    }
}
