//! HTTP adapter for the chat backend.
//!
//! [`ApiClient`] owns the fixed request settings (base URL, timeout, JSON
//! content type), reports each call to an injected [`RequestLogger`], and
//! normalizes failures into [`ApiError`]. It never retries.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{conversation_messages_path, ApiError, ChatRequest, CHAT_PATH, CONVERSATIONS_PATH};
use crate::utils::url::{construct_api_url, normalize_base_url};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Diagnostic side channel invoked around every backend call.
pub trait RequestLogger: Send + Sync {
    fn request(&self, method: &Method, url: &str);
    fn response(&self, method: &Method, url: &str, status: StatusCode, elapsed: Duration);
    fn failure(&self, method: &Method, url: &str, error: &ApiError);
}

/// Default [`RequestLogger`] that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRequestLogger;

impl RequestLogger for TracingRequestLogger {
    fn request(&self, method: &Method, url: &str) {
        debug!(%method, url, "Request");
    }

    fn response(&self, method: &Method, url: &str, status: StatusCode, elapsed: Duration) {
        debug!(
            %method,
            url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Response"
        );
    }

    fn failure(&self, method: &Method, url: &str, error: &ApiError) {
        match error {
            ApiError::Status { status, body } => {
                warn!(%method, url, status, body = %body, "Response error");
            }
            other => warn!(%method, url, error = %other, "Request error"),
        }
    }
}

/// The backend endpoints the client core depends on.
///
/// Responses are returned as raw JSON so callers decide how to interpret
/// their shape.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn list_conversations(&self) -> Result<Value, ApiError>;
    async fn conversation_messages(&self, conversation_id: &str) -> Result<Value, ApiError>;
    async fn send_chat(&self, request: &ChatRequest) -> Result<Value, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    logger: Arc<dyn RequestLogger>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_logger(base_url, Arc::new(TracingRequestLogger))
    }

    pub fn with_logger(base_url: &str, logger: Arc<dyn RequestLogger>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url),
            timeout: REQUEST_TIMEOUT,
            logger,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload =
            serde_json::to_vec(body).map_err(|err| ApiError::InvalidRequest(err.to_string()))?;
        self.execute(Method::POST, path, Some(payload)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Value, ApiError> {
        let url = construct_api_url(&self.base_url, path);
        self.logger.request(&method, &url);
        let started = Instant::now();

        match self.send(method.clone(), &url, body).await {
            Ok((status, value)) => {
                self.logger
                    .response(&method, &url, status, started.elapsed());
                Ok(value)
            }
            Err(err) => {
                self.logger.failure(&method, &url, &err);
                Err(err)
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Value), ApiError> {
        let mut request = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(err, self.timeout))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::from_reqwest(err, self.timeout))?;
        let value = parse_body(&text);

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: value,
            });
        }

        Ok((status, value))
    }
}

/// Empty bodies become `null`; anything that is not JSON is kept as a string.
fn parse_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn list_conversations(&self) -> Result<Value, ApiError> {
        self.get(CONVERSATIONS_PATH).await
    }

    async fn conversation_messages(&self, conversation_id: &str) -> Result<Value, ApiError> {
        self.get(&conversation_messages_path(conversation_id)).await
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<Value, ApiError> {
        self.post(CHAT_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<String>>,
    }

    impl RecordingLogger {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RequestLogger for RecordingLogger {
        fn request(&self, method: &Method, url: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("request {method} {url}"));
        }

        fn response(&self, method: &Method, url: &str, status: StatusCode, _elapsed: Duration) {
            self.events
                .lock()
                .unwrap()
                .push(format!("response {method} {url} {}", status.as_u16()));
        }

        fn failure(&self, method: &Method, url: &str, error: &ApiError) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failure {method} {url} {error}"));
        }
    }

    #[tokio::test]
    async fn get_sends_json_content_type_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "title": "First", "updated_at": "2024-01-01T00:00:00"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/", server.uri()));
        let value = client.list_conversations().await.unwrap();

        assert_eq!(value[0]["title"], "First");
    }

    #[tokio::test]
    async fn post_serializes_chat_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"message": "hello", "conversation_id": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "hi",
                "conversation_id": "42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let value = client
            .send_chat(&ChatRequest {
                message: "hello".to_string(),
                conversation_id: None,
            })
            .await
            .unwrap();

        assert_eq!(value["conversation_id"], "42");
    }

    #[tokio::test]
    async fn non_json_bodies_are_returned_as_strings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain reply"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let value = client.post(CHAT_PATH, &json!({})).await.unwrap();

        assert_eq!(value, Value::String("plain reply".to_string()));
    }

    #[tokio::test]
    async fn error_status_keeps_body_and_extracts_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/missing/messages"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Conversation not found"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        let err = client.conversation_messages("missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "Conversation not found");
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).with_timeout(Duration::from_millis(50));
        let err = client.post(CHAT_PATH, &json!({})).await.unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[tokio::test]
    async fn logger_sees_request_and_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;

        let logger = Arc::new(RecordingLogger::default());
        let client = ApiClient::with_logger(&server.uri(), logger.clone());
        client.get(CONVERSATIONS_PATH).await.unwrap();
        client.post(CHAT_PATH, &json!({})).await.unwrap_err();

        let base = server.uri();
        assert_eq!(
            logger.events(),
            vec![
                format!("request GET {base}/api/conversations"),
                format!("response GET {base}/api/conversations 200"),
                format!("request POST {base}/api/chat"),
                format!("failure POST {base}/api/chat Request failed with status code 500"),
            ]
        );
    }

    #[tokio::test]
    async fn connection_failures_are_network_errors() {
        let client = ApiClient::new("http://127.0.0.1:1");
        let err = client.get(CONVERSATIONS_PATH).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    }

    #[test]
    fn parse_body_handles_empty_and_text() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body("[1,2]"), json!([1, 2]));
        assert_eq!(parse_body("oops"), Value::String("oops".to_string()));
    }
}
