use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NotifierConfig {
    #[serde(default)]
    pub webhook: String,
    /// Signing secret; empty sends unsigned requests.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Treat a non-zero `errcode` in the response body as a failure.
    #[serde(default)]
    pub strict_errcode: bool,
}

impl NotifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook: String::new(),
            secret: String::new(),
            timeout_seconds: default_timeout_seconds(),
            strict_errcode: false,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    10
}
