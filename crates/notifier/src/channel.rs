use serde::Serialize;
use serde_json::Value;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;
    async fn send(&self, message: &TextMessage) -> Result<Value, NotifyError>;
}

/// `{"msgtype": "text", "text": {"content": ...}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMessage {
    pub msgtype: &'static str,
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
}

impl TextMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            msgtype: "text",
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

#[derive(Debug)]
pub enum NotifyError {
    /// Connection failure, timeout, or client construction error.
    Network(String),
    Status { status: u16, body: String },
    Decode(String),
    Api { code: i64, message: String },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "notify: network: {msg}"),
            Self::Status { status, body } => write!(f, "notify: HTTP {status}: {body}"),
            Self::Decode(msg) => write!(f, "notify: invalid response body: {msg}"),
            Self::Api { code, message } => write!(f, "notify: api error {code}: {message}"),
        }
    }
}

impl std::error::Error for NotifyError {}
