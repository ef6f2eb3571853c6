pub mod channel;
pub mod config;
pub mod dingtalk;
pub mod signer;

pub use channel::{Notifier, NotifyError, TextMessage};
pub use config::NotifierConfig;
pub use dingtalk::DingTalkNotifier;
pub use signer::{build_signed_url, build_signed_url_at};
