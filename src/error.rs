use reqwest::StatusCode;
use thiserror::Error;

/// Failures that terminate a triage run.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("this automation only runs on pull-request events (received `{0}`)")]
    UnsupportedEvent(String),

    #[error("event payload has no pull request attached")]
    MissingPullRequest,

    #[error("GitHub API error: {status} - {body}")]
    Gateway { status: StatusCode, body: String },
}
