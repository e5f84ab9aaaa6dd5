//! Client-side state of the chat screen.
//!
//! [`App`] is owned by the event loop and only changes through
//! [`apply_actions`]; backend work is requested by returning
//! [`AppCommand`]s.

use crate::core::conversations::ConversationStore;
use crate::core::message::{is_placeholder_id, Message};
use crate::core::message_store::MessageStore;

pub mod actions;
pub mod composer;
pub mod notifications;
pub mod ui_state;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use composer::Composer;
pub use notifications::{Notification, NotificationKind, Notifications, NOTIFICATION_TTL};
pub use ui_state::{Focus, ThreadScroll, UiState};

/// The one message currently waiting for a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// Optimistic user message as inserted into the store.
    pub draft: Message,
    /// Active conversation when the send started (`None` or a placeholder for new chats).
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SendPhase {
    #[default]
    Idle,
    Sending(PendingSend),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry<'a> {
    NewChat,
    Conversation(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Settled,
    Failed,
}

pub struct App {
    pub conversations: ConversationStore,
    pub messages: MessageStore,
    pub composer: Composer,
    pub send_phase: SendPhase,
    pub last_outcome: Option<SendOutcome>,
    pub notifications: Notifications,
    pub ui: UiState,
}

impl App {
    pub fn new(show_sidebar: bool) -> Self {
        Self {
            conversations: ConversationStore::new(),
            messages: MessageStore::new(),
            composer: Composer::new(),
            send_phase: SendPhase::Idle,
            last_outcome: None,
            notifications: Notifications::default(),
            ui: UiState::new(show_sidebar),
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.send_phase, SendPhase::Sending(_))
    }

    pub fn pending_send(&self) -> Option<&PendingSend> {
        match &self.send_phase {
            SendPhase::Sending(pending) => Some(pending),
            SendPhase::Idle => None,
        }
    }

    /// Return to `Idle` if `temp_id` names the in-flight message.
    pub(crate) fn take_pending(&mut self, temp_id: &str) -> Option<PendingSend> {
        if !self
            .pending_send()
            .is_some_and(|pending| pending.draft.id == temp_id)
        {
            return None;
        }
        match std::mem::take(&mut self.send_phase) {
            SendPhase::Sending(pending) => Some(pending),
            SendPhase::Idle => None,
        }
    }

    /// Sidebar rows: the new-chat entry followed by the conversations.
    pub fn sidebar_rows(&self) -> usize {
        self.conversations.len() + 1
    }

    /// Entry under the sidebar cursor.
    pub fn sidebar_selection(&self) -> Option<SidebarEntry<'_>> {
        match self.ui.sidebar_cursor {
            0 => Some(SidebarEntry::NewChat),
            row => self
                .conversations
                .get(row - 1)
                .map(|conversation| SidebarEntry::Conversation(conversation.id.as_str())),
        }
    }

    /// Move the sidebar cursor onto the active entry.
    pub(crate) fn sync_sidebar_cursor(&mut self) {
        match self.conversations.active_id() {
            None => {}
            Some(id) if is_placeholder_id(id) => self.ui.sidebar_cursor = 0,
            Some(id) => {
                if let Some(index) = self.conversations.position(id) {
                    self.ui.sidebar_cursor = index + 1;
                }
            }
        }
        self.ui.clamp_sidebar_cursor(self.sidebar_rows());
    }
}
