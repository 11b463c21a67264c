//! Match client: the single point of entry for calls to the scoring service.
//!
//! One attempt per submission. No retry, no backoff and no request timeout;
//! a call runs until the service answers or the connection fails.
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::errors::MatchError;
use crate::models::{HealthStatus, MatchRequest, MatchResult};

const MATCH_ENDPOINT: &str = "/match";
const HEALTH_ENDPOINT: &str = "/health";

/// Anything that can score a `MatchRequest`.
///
/// `MatchForm::submit` takes a `&dyn MatchService`, so the form never knows
/// which transport is behind it.
#[async_trait]
pub trait MatchService: Send + Sync {
    async fn submit_match(&self, request: MatchRequest) -> Result<MatchResult, MatchError>;
}

/// Multipart-over-HTTP implementation talking to `<api_base>/match`.
#[derive(Clone)]
pub struct HttpMatchClient {
    client: Client,
    api_base: String,
}

impl HttpMatchClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self, MatchError> {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            api_base,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }

    /// GET /health on the scoring service.
    pub async fn health(&self) -> Result<HealthStatus, MatchError> {
        let url = self.url(HEALTH_ENDPOINT);
        debug!("Checking scoring service health: {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            debug!("Health check returned {status}: {body}");
            return Err(MatchError::from_response_body(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MatchService for HttpMatchClient {
    async fn submit_match(&self, request: MatchRequest) -> Result<MatchResult, MatchError> {
        let url = self.url(MATCH_ENDPOINT);
        let [_, resume_field] = request.field_names();
        info!("Submitting match request to {url} (resume sent as '{resume_field}')");

        let form = request.into_form()?;
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            debug!("Scoring service returned {status}: {body}");
            return Err(MatchError::from_response_body(status.as_u16(), &body));
        }

        let result = MatchResult::from_body(&body)?;
        debug!(
            "Match scored: score={}, overlap={}, gaps={}",
            result.score,
            result.overlap.as_ref().map_or(0, Vec::len),
            result.gaps.as_ref().map_or(0, Vec::len)
        );
        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::FALLBACK_ALERT;
    use crate::models::ResumeFile;
    use axum::{
        extract::{Multipart, State},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// One multipart field as the fake service saw it.
    #[derive(Debug, Clone)]
    pub struct ReceivedField {
        pub name: String,
        pub file_name: Option<String>,
        pub content_type: Option<String>,
        pub data: Vec<u8>,
    }

    pub type Received = Arc<Mutex<Vec<ReceivedField>>>;

    /// Binds a router to an ephemeral loopback port and returns its base URL.
    pub async fn spawn_service(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A fake scoring service that records every field and replies with `reply`.
    pub async fn spawn_recording_service(status: StatusCode, reply: Value) -> (String, Received) {
        let received: Received = Arc::default();
        let app = Router::new()
            .route(
                "/match",
                post(
                    move |State(received): State<Received>, mut multipart: Multipart| {
                        let reply = reply.clone();
                        async move {
                            while let Some(field) = multipart.next_field().await.unwrap() {
                                let name = field.name().unwrap_or_default().to_string();
                                let file_name = field.file_name().map(str::to_string);
                                let content_type = field.content_type().map(str::to_string);
                                let data = field.bytes().await.unwrap().to_vec();
                                received.lock().unwrap().push(ReceivedField {
                                    name,
                                    file_name,
                                    content_type,
                                    data,
                                });
                            }
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(received.clone());
        (spawn_service(app).await, received)
    }

    fn field_names(received: &Received) -> Vec<String> {
        received
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    fn sample_reply() -> Value {
        json!({"ok": true, "score": 82, "overlap": ["python", "sql"], "gaps": ["aws"]})
    }

    #[tokio::test]
    async fn test_text_resume_sends_resume_text_field() {
        let (base, received) = spawn_recording_service(StatusCode::OK, sample_reply()).await;
        let client = HttpMatchClient::new(base).unwrap();

        let request = MatchRequest::new("Python and SQL developer", None, "Need python, sql, aws");
        let result = client.submit_match(request).await.unwrap();

        assert_eq!(result.score, 82.0);
        assert_eq!(field_names(&received), vec!["job_text", "resume_text"]);
        let fields = received.lock().unwrap();
        assert_eq!(fields[0].data, b"Need python, sql, aws");
        assert_eq!(fields[1].data, b"Python and SQL developer");
        assert!(fields[1].file_name.is_none());
    }

    #[tokio::test]
    async fn test_file_resume_sends_resume_field_only() {
        let (base, received) = spawn_recording_service(StatusCode::OK, sample_reply()).await;
        let client = HttpMatchClient::new(base).unwrap();

        let file = ResumeFile::new("cv.pdf", b"%PDF-1.4 fake".to_vec()).unwrap();
        let request = MatchRequest::new("also typed", Some(&file), "JD text");
        client.submit_match(request).await.unwrap();

        assert_eq!(field_names(&received), vec!["job_text", "resume"]);
        let fields = received.lock().unwrap();
        assert_eq!(fields[1].file_name.as_deref(), Some("cv.pdf"));
        assert_eq!(fields[1].content_type.as_deref(), Some("application/pdf"));
        assert_eq!(fields[1].data, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn test_error_body_message_reaches_alert() {
        let (base, _) =
            spawn_recording_service(StatusCode::PAYLOAD_TOO_LARGE, json!({"error": "file too large"}))
                .await;
        let client = HttpMatchClient::new(base).unwrap();

        let err = client
            .submit_match(MatchRequest::new("r", None, "j"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Api { status: 413, .. }));
        assert_eq!(err.alert_message(), "file too large");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_fallback() {
        let app = Router::new().route("/match", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let client = HttpMatchClient::new(spawn_service(app).await).unwrap();

        let err = client
            .submit_match(MatchRequest::new("r", None, "j"))
            .await
            .unwrap_err();
        assert_eq!(err.alert_message(), FALLBACK_ALERT);
    }

    #[tokio::test]
    async fn test_unreachable_service_uses_fallback() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpMatchClient::new(format!("http://{addr}")).unwrap();
        let err = client
            .submit_match(MatchRequest::new("r", None, "j"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Http(_)));
        assert_eq!(err.alert_message(), FALLBACK_ALERT);
    }

    #[tokio::test]
    async fn test_success_without_score_is_parse_error() {
        let (base, _) =
            spawn_recording_service(StatusCode::OK, json!({"overlap": [], "gaps": []})).await;
        let client = HttpMatchClient::new(base).unwrap();

        let err = client
            .submit_match(MatchRequest::new("r", None, "j"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)));
        assert_eq!(err.alert_message(), FALLBACK_ALERT);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_is_trimmed() {
        let (base, received) = spawn_recording_service(StatusCode::OK, sample_reply()).await;
        let client = HttpMatchClient::new(format!("{base}/")).unwrap();
        assert_eq!(client.api_base(), base);

        client
            .submit_match(MatchRequest::new("r", None, "j"))
            .await
            .unwrap();
        assert_eq!(received.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let app = Router::new().route("/health", get(|| async { Json(json!({"ok": true})) }));
        let client = HttpMatchClient::new(spawn_service(app).await).unwrap();

        let health = client.health().await.unwrap();
        assert!(health.ok);
    }
}
