use anyhow::Result;
use tracing::{debug, info};

use crate::{
    events::{PullRequestAction, ReviewAction, TriageEvent},
    github::GitHubClient,
};

mod assignee;
mod label;

/// A policy the dispatcher can schedule for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Label,
    Assign,
}

const BOTH: &[Operation] = &[Operation::Label, Operation::Assign];
const ASSIGN_ONLY: &[Operation] = &[Operation::Assign];
const NONE: &[Operation] = &[];

/// Which operations an event triggers, in execution order.
///
/// Matches are exhaustive on purpose: an action added to the payload enums
/// has to be routed here before the crate compiles again.
fn operations(event: &TriageEvent) -> &'static [Operation] {
    match event {
        TriageEvent::PullRequest(_) => BOTH,

        TriageEvent::PullRequestReview(event) => match event.action {
            ReviewAction::Submitted | ReviewAction::Edited | ReviewAction::Dismissed => ASSIGN_ONLY,
        },

        TriageEvent::PullRequestTarget(event) => match event.action {
            PullRequestAction::Synchronize => BOTH,

            PullRequestAction::ConvertedToDraft
            | PullRequestAction::ReadyForReview
            | PullRequestAction::ReviewRequested => ASSIGN_ONLY,

            PullRequestAction::Assigned
            | PullRequestAction::AutoMergeDisabled
            | PullRequestAction::AutoMergeEnabled
            | PullRequestAction::Closed
            | PullRequestAction::Demilestoned
            | PullRequestAction::Dequeued
            | PullRequestAction::Edited
            | PullRequestAction::Enqueued
            | PullRequestAction::Labeled
            | PullRequestAction::Locked
            | PullRequestAction::Milestoned
            | PullRequestAction::Opened
            | PullRequestAction::Reopened
            | PullRequestAction::ReviewRequestRemoved
            | PullRequestAction::Unassigned
            | PullRequestAction::Unlabeled
            | PullRequestAction::Unlocked => NONE,
        },
    }
}

/// Runs every operation the event calls for, sequentially. The first failing
/// operation aborts the run; writes already issued stay in effect.
pub async fn handle_event(client: &GitHubClient, label: &str, event: &TriageEvent) -> Result<()> {
    match event {
        TriageEvent::PullRequest(event) | TriageEvent::PullRequestTarget(event) => {
            debug!("{:?} by {}", event.action, event.sender.login)
        }
        TriageEvent::PullRequestReview(event) => {
            let reviewer = event
                .review
                .user
                .as_ref()
                .map_or("<unknown>", |user| user.login.as_str());
            debug!(
                "review {:?} by {} ({}), sent by {}",
                event.action, reviewer, event.review.state, event.sender.login
            );
        }
    }

    let operations = operations(event);
    if operations.is_empty() {
        debug!("event needs no triage");
        return Ok(());
    }

    let repo = event.repository();
    let pull = event.pull_request()?;
    info!("triaging {} in {} ({})", pull, repo.full_name, pull.html_url);

    for operation in operations {
        match operation {
            Operation::Label => label::apply(client, repo, pull, label).await?,
            Operation::Assign => assignee::sync(client, repo, pull).await?,
        }
    }

    Ok(())
}
