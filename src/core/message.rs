use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of identifiers minted on the client and not yet acknowledged by the backend.
pub const PLACEHOLDER_PREFIX: &str = "temp-";

const GENERATED_PREFIX: &str = "msg-";
const ERROR_PREFIX: &str = "error-";
const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(format!("invalid message role: {value}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    /// RFC 3339 timestamp as sent by the backend or minted locally.
    pub timestamp: String,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        role: Role,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role,
            timestamp: timestamp.into(),
        }
    }

    /// A user message that has not been acknowledged by the backend yet.
    pub fn user_draft(content: impl Into<String>) -> Self {
        Self::new(placeholder_id(), Role::User, content, now_timestamp())
    }

    /// Assistant-role bubble describing a failed send.
    pub fn error_notice(description: &str) -> Self {
        Self::new(
            format!("{ERROR_PREFIX}{}", Utc::now().timestamp_millis()),
            Role::Assistant,
            format!("Error: {description}"),
            now_timestamp(),
        )
    }

    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_provisional(&self) -> bool {
        is_placeholder_id(&self.id)
    }
}

pub fn is_placeholder_id(id: &str) -> bool {
    id.starts_with(PLACEHOLDER_PREFIX)
}

/// Mint a placeholder id such as `temp-1700000000000`.
pub fn placeholder_id() -> String {
    format!("{PLACEHOLDER_PREFIX}{}", Utc::now().timestamp_millis())
}

/// Mint an id for a message the backend delivered without one.
pub fn generated_message_id() -> String {
    format!(
        "{GENERATED_PREFIX}{}-{}",
        Utc::now().timestamp_millis(),
        random_suffix()
    )
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn random_suffix() -> String {
    let mut bytes = [0u8; RANDOM_SUFFIX_LEN];
    if getrandom::fill(&mut bytes).is_err() {
        // Without an entropy source, a process-wide counter keeps ids distinct.
        let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        return format!("{sequence:0>width$}", width = RANDOM_SUFFIX_LEN);
    }
    bytes
        .iter()
        .map(|byte| BASE36[(*byte as usize) % BASE36.len()] as char)
        .collect()
}
