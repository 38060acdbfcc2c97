//! HTTP client and retrying request dispatcher.
//!
//! The [`OpenAi`] client issues single chat-completion requests; [`dispatch`]
//! wraps any [`Transport`] in the bounded retry loop used by the session loop.

use std::env;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, header};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::observability;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// One message in an outbound chat-completions request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMessage {
    /// The message role; always "user" for this client.
    pub role: String,
    /// The literal user text.
    pub content: String,
}

/// Body of a chat-completions request.
///
/// Serialized with serde so the user text is always correctly JSON-escaped,
/// whatever quotes or control characters it contains.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model identifier.
    pub model: String,
    /// The messages to complete; a single user message for this client.
    pub messages: Vec<RequestMessage>,
}

impl ChatRequest {
    /// Creates a single-user-message request for the given model.
    pub fn user(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: content.into(),
            }],
        }
    }
}

/// Retry behavior for [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts before giving up.
    pub max_attempts: u32,
    /// Delay between consecutive attempts.
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy with the given attempt count and delay.
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

/// A single attempt at the completion endpoint.
///
/// Implementations return the raw response body text of one POST. The
/// dispatcher layers retries on top; tests substitute fakes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request carrying `message` and returns the body text.
    async fn send(&self, message: &str) -> Result<String>;
}

/// Client for an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAi {
    api_key: String,
    client: ReqwestClient,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAi {
    /// Create a new OpenAi client.
    ///
    /// The API key can be provided directly or read from the OPENAI_API_KEY
    /// environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var("OPENAI_API_KEY").map_err(|_| {
                Error::authentication(
                    "API key not provided and OPENAI_API_KEY environment variable not set",
                )
            })?,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
            timeout,
        })
    }

    /// Sets the model identifier sent with every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Returns the model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(header::AUTHORIZATION, value);
        }
        headers
    }
}

#[async_trait]
impl Transport for OpenAi {
    async fn send(&self, message: &str) -> Result<String> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}chat/completions", self.base_url);
        let request = ChatRequest::user(self.model.clone(), message);
        let payload = serde_json::to_string(&request)?;

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        // API-level errors arrive as a JSON body on a non-2xx status. The
        // interpreter decides what the body means, so the text is returned
        // regardless of status.
        let body = response.text().await.map_err(|e| {
            Error::http_client(
                format!("Failed to read response body: {}", e),
                Some(Box::new(e)),
            )
        })?;
        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        Ok(body)
    }
}

/// Issue a request with bounded retries and return the raw response body.
///
/// An attempt succeeds as soon as the transport produces a non-empty body;
/// the body is not inspected here, so an API error payload still counts as
/// success at this layer. A transport failure or an empty body writes one
/// diagnostic line to stderr and retries after `policy.retry_delay`, up to
/// `policy.max_attempts` attempts total. Exhaustion yields a sentinel
/// failure string rather than an error.
pub async fn dispatch(transport: &dyn Transport, message: &str, policy: &RetryPolicy) -> String {
    for attempt in 1..=policy.max_attempts {
        match transport.send(message).await {
            Ok(body) if !body.is_empty() => return body,
            Ok(_) => {
                eprintln!(
                    "Attempt {attempt} of {} returned an empty body.",
                    policy.max_attempts
                );
            }
            Err(err) => {
                eprintln!("Attempt {attempt} of {} failed: {err}", policy.max_attempts);
            }
        }
        observability::CLIENT_REQUEST_ERRORS.click();
        if attempt < policy.max_attempts {
            observability::CLIENT_REQUEST_RETRIES.click();
            tokio::time::sleep(policy.retry_delay).await;
        }
    }
    format!(
        "Error: failed to reach the API after {} attempts.",
        policy.max_attempts
    )
}
