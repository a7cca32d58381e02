use std::fmt::Display;

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::error::TriageError;

mod pull_request;
mod pull_request_review;

pub use pull_request::*;
pub use pull_request_review::*;

/// A pull-request lifecycle event this automation knows how to triage.
///
/// `pull_request` and `pull_request_target` share a payload shape, so both
/// carry a [`PullRequestEvent`].
#[derive(Debug)]
pub enum TriageEvent {
    PullRequest(PullRequestEvent),
    PullRequestReview(PullRequestReviewEvent),
    PullRequestTarget(PullRequestEvent),
}

impl TriageEvent {
    /// Parses the raw JSON payload delivered for `name` into a typed event.
    ///
    /// Event names outside the pull-request family are rejected before the
    /// payload is even looked at.
    pub fn parse(name: &str, payload: &str) -> anyhow::Result<Self> {
        let event = match name {
            "pull_request" => Self::PullRequest(Self::payload(name, payload)?),
            "pull_request_review" => Self::PullRequestReview(Self::payload(name, payload)?),
            "pull_request_target" => Self::PullRequestTarget(Self::payload(name, payload)?),
            _ => return Err(TriageError::UnsupportedEvent(name.to_owned()).into()),
        };

        Ok(event)
    }

    fn payload<T: DeserializeOwned>(name: &str, payload: &str) -> anyhow::Result<T> {
        serde_json::from_str(payload)
            .with_context(|| format!("couldn't parse `{}` event payload", name))
    }

    /// Repository the event happened in.
    pub fn repository(&self) -> &Repository {
        match self {
            Self::PullRequest(event) | Self::PullRequestTarget(event) => &event.repository,
            Self::PullRequestReview(event) => &event.repository,
        }
    }

    /// The pull request the event is about.
    ///
    /// GitHub only attaches one when the workflow actually ran in a
    /// pull-request context, so this can legitimately be missing.
    pub fn pull_request(&self) -> Result<&PullRequest, TriageError> {
        let pull = match self {
            Self::PullRequest(event) | Self::PullRequestTarget(event) => {
                event.pull_request.as_ref()
            }
            Self::PullRequestReview(event) => event.pull_request.as_ref(),
        };

        pull.ok_or(TriageError::MissingPullRequest)
    }
}

#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: GitHubUser,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: Url,
    pub draft: bool,
    pub user: GitHubUser,
}

impl Display for PullRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PR #{}: {} by {}", self.number, self.title, self.user.login)
    }
}
