//! Runs [`AppCommand`]s against the backend and reports back as actions.

use std::sync::Arc;

use tracing::debug;

use crate::api::ChatBackend;
use crate::core::app::{AppAction, AppActionContext, AppActionDispatcher, AppCommand};

#[derive(Clone)]
pub struct BackendService {
    backend: Arc<dyn ChatBackend>,
    dispatcher: AppActionDispatcher,
}

impl BackendService {
    pub fn new(backend: Arc<dyn ChatBackend>, dispatcher: AppActionDispatcher) -> Self {
        Self {
            backend,
            dispatcher,
        }
    }

    /// Run `command` on a background task; its result arrives as an action.
    pub fn spawn(&self, command: AppCommand) {
        let backend = Arc::clone(&self.backend);
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let action = execute(backend.as_ref(), command).await;
            dispatcher.dispatch(action, AppActionContext::default());
        });
    }
}

/// Perform one backend call and wrap its outcome.
pub async fn execute(backend: &dyn ChatBackend, command: AppCommand) -> AppAction {
    match command {
        AppCommand::LoadConversations => {
            debug!("Loading conversations");
            AppAction::ConversationsLoaded {
                result: backend.list_conversations().await,
            }
        }
        AppCommand::LoadMessages { conversation_id } => {
            debug!(conversation_id = %conversation_id, "Loading messages");
            let result = backend.conversation_messages(&conversation_id).await;
            AppAction::MessagesLoaded {
                conversation_id,
                result,
            }
        }
        AppCommand::SendChat { temp_id, request } => {
            debug!(temp_id = %temp_id, "Sending chat message");
            AppAction::ChatCompleted {
                temp_id,
                result: backend.send_chat(&request).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ChatRequest};
    use crate::core::app::AppActionEnvelope;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        async fn list_conversations(&self) -> Result<Value, ApiError> {
            self.calls.lock().unwrap().push("list".into());
            Ok(json!([]))
        }

        async fn conversation_messages(&self, conversation_id: &str) -> Result<Value, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("messages {conversation_id}"));
            Err(ApiError::Status {
                status: 404,
                body: json!({"detail": "Conversation not found"}),
            })
        }

        async fn send_chat(&self, request: &ChatRequest) -> Result<Value, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("chat {}", request.message));
            Ok(json!({"content": "pong"}))
        }
    }

    #[tokio::test]
    async fn execute_maps_commands_to_actions() {
        let backend = RecordingBackend::default();

        let action = execute(
            &backend,
            AppCommand::LoadMessages {
                conversation_id: "c1".into(),
            },
        )
        .await;
        match action {
            AppAction::MessagesLoaded {
                conversation_id,
                result,
            } => {
                assert_eq!(conversation_id, "c1");
                assert_eq!(result.unwrap_err().status(), Some(404));
            }
            _ => panic!("expected MessagesLoaded"),
        }

        let action = execute(
            &backend,
            AppCommand::SendChat {
                temp_id: "temp-1".into(),
                request: ChatRequest {
                    message: "ping".into(),
                    conversation_id: None,
                },
            },
        )
        .await;
        assert!(matches!(
            action,
            AppAction::ChatCompleted { ref temp_id, result: Ok(_) } if temp_id == "temp-1"
        ));

        assert_eq!(
            backend.calls.lock().unwrap().clone(),
            vec!["messages c1".to_string(), "chat ping".to_string()]
        );
    }

    #[tokio::test]
    async fn spawned_commands_report_through_dispatcher() {
        let (tx, mut rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
        let service = BackendService::new(
            Arc::new(RecordingBackend::default()),
            AppActionDispatcher::new(tx),
        );

        service.spawn(AppCommand::LoadConversations);

        let envelope = rx.recv().await.expect("action");
        assert!(matches!(
            envelope.action,
            AppAction::ConversationsLoaded { result: Ok(_) }
        ));
    }
}
