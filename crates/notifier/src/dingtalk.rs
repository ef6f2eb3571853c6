use reqwest::Client;
use serde_json::Value;

use super::channel::{Notifier, NotifyError, TextMessage};
use super::signer::build_signed_url;
use crate::config::NotifierConfig;

/// Chat-bot webhook client using the DingTalk signing scheme: the signature
/// travels in the query string, the message in a JSON body.
pub struct DingTalkNotifier {
    webhook: String,
    secret: String,
    strict_errcode: bool,
    client: Client,
}

impl DingTalkNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NotifyError::Network(e.to_string()))?;
        Ok(Self {
            webhook: config.webhook.clone(),
            secret: config.secret.clone(),
            strict_errcode: config.strict_errcode,
            client,
        })
    }

    pub async fn send_text(&self, content: &str) -> Result<Value, NotifyError> {
        self.send(&TextMessage::new(content)).await
    }
}

#[async_trait::async_trait]
impl Notifier for DingTalkNotifier {
    fn name(&self) -> &str {
        "dingtalk"
    }

    async fn send(&self, message: &TextMessage) -> Result<Value, NotifyError> {
        let url = build_signed_url(&self.webhook, &self.secret);
        tracing::debug!(signed = !self.secret.is_empty(), "sending text message");

        let resp = self
            .client
            .post(&url)
            .json(message)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "webhook responded");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| NotifyError::Decode(e.without_url().to_string()))?;

        if self.strict_errcode {
            check_errcode(&body)?;
        }
        Ok(body)
    }
}

fn check_errcode(body: &Value) -> Result<(), NotifyError> {
    let code = body.get("errcode").and_then(Value::as_i64).unwrap_or(-1);
    if code == 0 {
        return Ok(());
    }
    let message = body
        .get("errmsg")
        .and_then(Value::as_str)
        .unwrap_or("missing errcode")
        .to_string();
    tracing::warn!(code, %message, "webhook rejected message");
    Err(NotifyError::Api { code, message })
}
