//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input is read on a background task and turned into
//! [`AppAction`]s, which are applied to the shared [`App`] as soon as each
//! event is handled so keystrokes never overtake an earlier submit. The
//! [`AppCommand`]s they return run on the [`BackendService`], whose results
//! come back through the action queue.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{ApiClient, ChatBackend};
use crate::core::app::{
    apply_action, apply_actions, App, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
use crate::core::backend_service::BackendService;
use crate::ui::renderer::ui;

use super::keybindings::{resolve_key, resolve_mouse, sanitize_pasted_text, KeyResult};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::AppHandle;

const MAX_FPS: u64 = 60;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub base_url: String,
    pub show_sidebar: bool,
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    app.update(|app| terminal_guard.draw(|f| ui(f, app)).map(|_| ()))
        .await?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
}

fn spawn_commands(service: &BackendService, commands: Vec<AppCommand>) {
    for command in commands {
        debug!(?command, "Spawning backend command");
        service.spawn(command);
    }
}

/// Apply an input-driven action right away, in event order.
async fn apply_now(
    app: &AppHandle,
    service: &BackendService,
    action: AppAction,
    ctx: AppActionContext,
) {
    let commands = app.update(|app| apply_action(app, action, ctx)).await;
    spawn_commands(service, commands);
}

async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    service: &BackendService,
    term_size: Size,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
    };
    let ctx = AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    };

    while let Ok(UiEvent::Crossterm(ev)) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let result = app.read(|app| resolve_key(app, &key)).await;
                match result {
                    KeyResult::Dispatch(action) => apply_now(app, service, action, ctx).await,
                    KeyResult::Edit => {
                        app.update(|app| app.composer.input(key)).await;
                    }
                    KeyResult::Newline => {
                        app.update(|app| app.composer.insert_newline()).await;
                    }
                    KeyResult::Ignored => continue,
                }
                outcome.request_redraw = true;
            }
            Event::Mouse(mouse) => {
                if let Some(action) = resolve_mouse(&mouse) {
                    apply_now(app, service, action, ctx).await;
                    outcome.request_redraw = true;
                }
            }
            Event::Paste(text) => {
                let text = sanitize_pasted_text(&text);
                if !text.is_empty() {
                    apply_now(app, service, AppAction::InsertIntoComposer { text }, ctx).await;
                    outcome.request_redraw = true;
                }
            }
            Event::Resize(..) => outcome.request_redraw = true,
            _ => {}
        }
    }

    outcome
}

/// Apply queued actions and start the backend work they request.
async fn drain_action_queue(
    app: &AppHandle,
    service: &BackendService,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    spawn_commands(service, commands);
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(options: ChatOptions) -> Result<(), Box<dyn Error>> {
    let backend: Arc<dyn ChatBackend> = Arc::new(ApiClient::new(&options.base_url));
    info!(base_url = %options.base_url, "Starting chat session");

    let app = AppHandle::new(App::new(options.show_sidebar));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let service = BackendService::new(backend, dispatcher.clone());

    dispatcher.dispatch(AppAction::RefreshConversations, AppActionContext::default());

    let terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if app.read(|app| app.ui.exit_requested).await {
            break 'main_loop Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break 'main_loop Err(err.into());
        }

        let term_size = current_terminal_size(&terminal).await;
        app.update(|app| app.ui.last_term_size = term_size).await;

        let event_outcome = process_ui_events(&app, &mut event_rx, &service, term_size).await;
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        let actions_applied = drain_action_queue(&app, &service, &mut action_rx).await;
        if actions_applied {
            request_redraw = true;
        }

        if app.update(|app| app.notifications.prune(Instant::now())).await {
            request_redraw = true;
        }

        let idle = !event_outcome.events_processed && !actions_applied && !request_redraw;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    info!("Chat session ended");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ChatRequest};
    use crate::core::message::Role;
    use async_trait::async_trait;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::{json, Value};

    struct ScriptedBackend;

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn list_conversations(&self) -> Result<Value, ApiError> {
            Ok(json!([{"id": "conv-42", "title": "Greetings", "updated_at": ""}]))
        }

        async fn conversation_messages(&self, _conversation_id: &str) -> Result<Value, ApiError> {
            Ok(json!([]))
        }

        async fn send_chat(&self, request: &ChatRequest) -> Result<Value, ApiError> {
            Ok(json!({
                "content": format!("echo: {}", request.message),
                "conversation_id": "conv-42",
                "message_id": "msg-1"
            }))
        }
    }

    fn setup() -> (
        AppHandle,
        BackendService,
        mpsc::UnboundedReceiver<AppActionEnvelope>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = BackendService::new(Arc::new(ScriptedBackend), AppActionDispatcher::new(tx));
        (AppHandle::new(App::new(true)), service, rx)
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Crossterm(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    async fn drain_until(
        app: &AppHandle,
        service: &BackendService,
        rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
        done: impl Fn(&App) -> bool,
    ) {
        for _ in 0..100 {
            drain_action_queue(app, service, rx).await;
            if app.read(&done).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn typed_message_round_trips_through_backend() {
        let (app, service, mut rx) = setup();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        for code in [KeyCode::Char('h'), KeyCode::Char('i'), KeyCode::Enter] {
            event_tx.send(key(code)).unwrap();
        }

        let outcome = process_ui_events(&app, &mut event_rx, &service, Size::new(80, 24)).await;
        assert!(outcome.events_processed);
        assert_eq!(app.read(|app| app.messages.len()).await, 1);
        assert!(app.read(|app| app.is_sending()).await);

        drain_until(&app, &service, &mut rx, |app| {
            !app.is_sending() && app.conversations.len() == 1
        })
        .await;

        app.read(|app| {
            let messages = app.messages.messages();
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].id, "msg-1");
            assert_eq!(messages[1].role, Role::Assistant);
            assert_eq!(messages[1].content, "echo: hi");
            assert_eq!(app.conversations.active_id(), Some("conv-42"));
            assert!(app.composer.is_blank());
        })
        .await;
    }

    #[tokio::test]
    async fn keys_after_enter_in_one_batch_stay_in_the_composer() {
        let (app, service, mut rx) = setup();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        for code in [
            KeyCode::Char('h'),
            KeyCode::Char('i'),
            KeyCode::Enter,
            KeyCode::Char('x'),
        ] {
            event_tx.send(key(code)).unwrap();
        }

        process_ui_events(&app, &mut event_rx, &service, Size::new(80, 24)).await;

        app.read(|app| {
            let messages = app.messages.messages();
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].content, "hi");
            assert_eq!(app.composer.text(), "x");
        })
        .await;

        drain_until(&app, &service, &mut rx, |app| !app.is_sending()).await;
        app.read(|app| {
            assert_eq!(app.messages.messages()[1].content, "echo: hi");
            assert_eq!(app.composer.text(), "x");
        })
        .await;
    }

    #[tokio::test]
    async fn pasted_text_lands_in_composer() {
        let (app, service, _rx) = setup();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        event_tx
            .send(UiEvent::Crossterm(Event::Paste("line one\r\nline two".into())))
            .unwrap();
        event_tx.send(key(KeyCode::Char('!'))).unwrap();

        process_ui_events(&app, &mut event_rx, &service, Size::new(80, 24)).await;

        assert_eq!(
            app.read(|app| app.composer.text()).await,
            "line one\nline two!"
        );
    }
}
