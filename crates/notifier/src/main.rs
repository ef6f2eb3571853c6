use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use followsync_notifier::{config, DingTalkNotifier};

const DEFAULT_MESSAGE: &str = "[followsync] test message - webhook notifier integration check";

#[derive(Parser)]
#[command(
    name = "followsync-notify",
    version,
    about = "Send a signed text message to a chat-bot webhook"
)]
pub struct Opts {
    #[arg(default_value = DEFAULT_MESSAGE, help = "Message text")]
    message: String,

    #[arg(long, help = "Path to notifier config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let opts = Opts::parse();

    let cfg = config::resolve(opts.config.as_deref()).context("loading notifier config")?;
    let notifier = DingTalkNotifier::new(&cfg)?;
    let result = notifier
        .send_text(&opts.message)
        .await
        .context("sending text message")?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Result: {result}");
    }

    Ok(())
}
