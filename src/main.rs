use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

mod error;

mod events;
use events::TriageEvent;

mod github;
use github::GitHubClient;

mod triage;

/// Keeps pull-request labels and assignees in line with review activity.
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// Access token used for every GitHub API call
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Label applied when a pull request touches markdown files
    #[arg(long, default_value = "documentation")]
    label: String,

    /// Name of the event that triggered this run
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    let payload = fs::read_to_string(&opts.event_path)
        .with_context(|| format!("couldn't read {}", opts.event_path.display()))?;
    debug!("received `{}` event", opts.event_name);

    let event = TriageEvent::parse(&opts.event_name, &payload)?;
    let client = GitHubClient::new(opts.token)?;

    triage::handle_event(&client, &opts.label, &event).await
}
