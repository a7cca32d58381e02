use serde::Deserialize;

use crate::events::{GitHubUser, PullRequest, Repository};

#[derive(Debug, Deserialize)]
pub struct PullRequestReviewEvent {
    pub action: ReviewAction,
    pub review: ReviewSummary,
    pub pull_request: Option<PullRequest>,
    pub repository: Repository,
    pub sender: GitHubUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Submitted,
    Edited,
    Dismissed,
}

/// Snapshot of the review that triggered the event.
///
/// Informational only: the assignment policy re-fetches the full review list
/// through the API rather than trusting this single entry.
#[derive(Debug, Deserialize)]
pub struct ReviewSummary {
    pub state: String,
    pub user: Option<GitHubUser>,
}
