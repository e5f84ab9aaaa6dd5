//! Known conversations and the active-conversation pointer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::api::json_id;
use crate::core::message::{is_placeholder_id, placeholder_id};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub updated_at: String,
}

impl Conversation {
    fn from_value(value: &Value) -> Option<Self> {
        let id = value.get("id").and_then(json_id)?;
        let text = |field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            id,
            title: text("title"),
            updated_at: text("updated_at"),
        })
    }
}

/// Interpret a `GET /api/conversations` body.
///
/// Returns `None` when the body is not an array. Entries without a usable
/// `id` are dropped.
pub fn parse_conversation_list(value: &Value) -> Option<Vec<Conversation>> {
    let items = value.as_array()?;
    let conversations = items
        .iter()
        .filter_map(|item| {
            let parsed = Conversation::from_value(item);
            if parsed.is_none() {
                warn!(item = %item, "Skipping conversation without an id");
            }
            parsed
        })
        .collect();
    Some(conversations)
}

#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Conversation> {
        self.conversations.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }

    pub fn active_is_placeholder(&self) -> bool {
        self.active_id.as_deref().is_some_and(is_placeholder_id)
    }

    /// The id to send to the backend; placeholders and "no selection" map to `None`.
    pub fn backend_conversation_id(&self) -> Option<String> {
        self.active_id
            .as_deref()
            .filter(|id| !is_placeholder_id(id))
            .map(str::to_owned)
    }

    pub fn active_title(&self) -> Option<&str> {
        let id = self.active_id.as_deref()?;
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.as_str())
    }

    /// Replace the list wholesale with a fresh backend snapshot.
    pub fn replace(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    /// Point at `id`. Returns `false` when it was already active.
    pub fn select(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.is_active(&id) {
            return false;
        }
        self.active_id = Some(id);
        true
    }

    /// Point at a fresh client-side placeholder and return its id.
    pub fn start_placeholder(&mut self) -> String {
        let id = placeholder_id();
        self.active_id = Some(id.clone());
        id
    }

    /// Swap the pointer to a backend-issued id, returning the previous one.
    pub fn adopt_backend_id(&mut self, id: impl Into<String>) -> Option<String> {
        self.active_id.replace(id.into())
    }

    pub fn clear_selection(&mut self) {
        self.active_id = None;
    }
}
