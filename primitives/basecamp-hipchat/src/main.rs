//! Basecamp to HipChat relay
//!
//! Polls a Basecamp account's activity feed and posts every new event to the
//! HipChat room of its project.
//!
//! Rooms opt in to a project by using the project name as room name, or by
//! mentioning it in the room topic. A room whose topic contains `Basecamp:*`
//! receives the events of all other projects.
//!
//! # Usage
//!
//! ```bash
//! # Credentials from the environment
//! BASECAMP_ACCOUNT=999999 BASECAMP_USER=relay BASECAMP_PASS=... \
//! HIPCHAT_API_KEY=... basecamp-hipchat
//!
//! # Poll every 30 seconds with debug logs
//! RUST_LOG=debug basecamp-hipchat --refresh 30
//! ```

mod relay;

use std::time::Duration;

use anyhow::{Context, ensure};
use basecamp_source::{BasecampClient, BasecampConfig, client, monitor_events};
use clap::Parser;
use hipchat_sink::{Dispatcher, HipchatClient};
use secrecy::SecretString;
use tokio::signal::unix::{SignalKind, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Relays Basecamp events into HipChat rooms.
#[derive(Parser, Debug)]
#[command(name = "basecamp-hipchat")]
#[command(about = "Relays Basecamp project activity into HipChat rooms")]
struct Args {
    /// Basecamp account ID.
    #[arg(long, env = "BASECAMP_ACCOUNT")]
    basecamp_account: u64,

    /// Username of a Basecamp login that can see all projects.
    #[arg(long, env = "BASECAMP_USER")]
    basecamp_user: String,

    /// Password of that Basecamp login.
    #[arg(long, env = "BASECAMP_PASS", hide_env_values = true)]
    basecamp_pass: String,

    /// HipChat v1 API token.
    #[arg(long, env = "HIPCHAT_API_KEY", hide_env_values = true)]
    hipchat_api_key: String,

    /// Seconds between two polls of the activity feed.
    #[arg(long, env = "BASECAMP_HIPCHAT_REFRESH", default_value = "10")]
    refresh: u64,

    /// Basecamp API host.
    #[arg(long, env = "BASECAMP_URL", default_value = client::DEFAULT_BASE_URL)]
    basecamp_url: String,

    /// HipChat API host.
    #[arg(long, env = "HIPCHAT_URL", default_value = hipchat_sink::client::DEFAULT_BASE_URL)]
    hipchat_url: String,

    /// User-Agent sent to Basecamp; should name the relay and a contact.
    #[arg(long, env = "BASECAMP_USER_AGENT", default_value = client::DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.basecamp_account != 0, "Basecamp account ID must be set");
        ensure!(!self.basecamp_user.is_empty(), "Basecamp username must be set");
        ensure!(!self.basecamp_pass.is_empty(), "Basecamp password must be set");
        ensure!(!self.hipchat_api_key.is_empty(), "HipChat API key must be set");
        ensure!(self.refresh > 0, "refresh interval must be at least one second");
        Ok(())
    }

    fn basecamp_config(&self) -> BasecampConfig {
        BasecampConfig {
            base_url: self.basecamp_url.clone(),
            username: self.basecamp_user.clone(),
            password: SecretString::from(self.basecamp_pass.clone()),
            user_agent: self.user_agent.clone(),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "basecamp_hipchat=info,basecamp_source=info,hipchat_sink=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    args.validate()?;

    let basecamp = BasecampClient::new(args.basecamp_config())
        .context("Failed to build Basecamp client")?;
    let hipchat = HipchatClient::with_base_url(
        args.hipchat_url.clone(),
        SecretString::from(args.hipchat_api_key.clone()),
    )
    .context("Failed to build HipChat client")?;
    let dispatcher = Dispatcher::new(hipchat);

    // Set up SIGTERM handler for graceful shutdown
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    let interval = Duration::from_secs(args.refresh);
    let (events, monitor) = monitor_events(
        basecamp,
        args.basecamp_account,
        interval,
        chrono::Utc::now(),
    );

    tracing::info!(
        account = args.basecamp_account,
        refresh_secs = args.refresh,
        "watching Basecamp activity"
    );

    tokio::select! {
        _ = relay::relay(events, &dispatcher) => {
            tracing::warn!("event monitor stopped");
        }
        _ = sigterm.recv() => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }

    monitor.abort();
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    if let Err(e) = run(args).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
