use anyhow::Result;
use tracing::debug;

use crate::{
    events::{PullRequest, Repository},
    github::{GitHubClient, Review, ReviewState},
};

/// The single user responsible for moving the pull request forward.
///
/// A requested change always goes back to the author, no matter what other
/// reviews say. Otherwise an unfinished review keeps the pull request with
/// its reviewer (the oldest one, in the order GitHub returns them). Once
/// every review is dealt with, nobody is assigned.
fn decide_assignee<'a>(author: &'a str, reviews: &'a [Review]) -> Option<&'a str> {
    if reviews
        .iter()
        .any(|review| review.state == ReviewState::ChangesRequested)
    {
        return Some(author);
    }

    if let Some(pending) = reviews
        .iter()
        .find(|review| review.state == ReviewState::Pending)
    {
        // a review still being written can lack a user; the pull request
        // ends up unassigned then
        return pending.user.as_ref().map(|user| user.login.as_str());
    }

    None
}

/// Keeps the assignee in sync with the review state.
///
/// Draft pull requests always sit with their author and skip the review
/// fetch entirely. The assignee set is replaced wholesale either way, so
/// re-running converges on the same state.
pub(crate) async fn sync(client: &GitHubClient, repo: &Repository, pull: &PullRequest) -> Result<()> {
    if pull.draft {
        debug!("{} is a draft, assigning the author", pull);
        return client
            .update_assignees(
                &repo.owner.login,
                &repo.name,
                pull.number,
                &[pull.user.login.clone()],
            )
            .await;
    }

    let reviews = client
        .list_reviews(&repo.owner.login, &repo.name, pull.number)
        .await?;
    debug!("{} review(s) on {}", reviews.len(), pull);

    let assignees = match decide_assignee(&pull.user.login, &reviews) {
        Some(assignee) => vec![assignee.to_owned()],
        None => vec![],
    };

    client
        .update_assignees(&repo.owner.login, &repo.name, pull.number, &assignees)
        .await
}

#[cfg(test)]
mod tests {
    use crate::events::GitHubUser;

    use super::*;

    fn review(state: ReviewState, user: Option<&str>) -> Review {
        Review {
            user: user.map(|login| GitHubUser {
                login: login.to_string(),
            }),
            state,
        }
    }

    #[test]
    fn requested_changes_go_back_to_the_author() {
        let reviews = [
            review(ReviewState::Approved, Some("bob")),
            review(ReviewState::ChangesRequested, Some("carol")),
            review(ReviewState::Approved, Some("dan")),
        ];
        assert_eq!(decide_assignee("alice", &reviews), Some("alice"));
    }

    #[test]
    fn requested_changes_outrank_pending_reviews() {
        let reviews = [
            review(ReviewState::Pending, Some("bob")),
            review(ReviewState::ChangesRequested, Some("carol")),
        ];
        assert_eq!(decide_assignee("alice", &reviews), Some("alice"));
    }

    #[test]
    fn a_pending_review_sits_with_its_reviewer() {
        let reviews = [
            review(ReviewState::Approved, Some("bob")),
            review(ReviewState::Pending, Some("carol")),
        ];
        assert_eq!(decide_assignee("alice", &reviews), Some("carol"));
    }

    #[test]
    fn the_first_pending_review_wins() {
        let reviews = [
            review(ReviewState::Pending, Some("bob")),
            review(ReviewState::Pending, Some("carol")),
        ];
        assert_eq!(decide_assignee("alice", &reviews), Some("bob"));
    }

    #[test]
    fn a_pending_review_without_a_user_clears_the_assignee() {
        let reviews = [review(ReviewState::Pending, None)];
        assert_eq!(decide_assignee("alice", &reviews), None);
    }

    #[test]
    fn two_approvals_clear_the_assignee() {
        let reviews = [
            review(ReviewState::Approved, Some("bob")),
            review(ReviewState::Approved, Some("carol")),
        ];
        assert_eq!(decide_assignee("alice", &reviews), None);
    }

    #[test]
    fn a_single_approval_also_clears_the_assignee() {
        let reviews = [review(ReviewState::Approved, Some("bob"))];
        assert_eq!(decide_assignee("alice", &reviews), None);
    }

    #[test]
    fn comment_only_reviews_are_ignored() {
        let reviews = [
            review(ReviewState::Commented, Some("bob")),
            review(ReviewState::Dismissed, Some("carol")),
        ];
        assert_eq!(decide_assignee("alice", &reviews), None);
    }

    #[test]
    fn no_reviews_clear_the_assignee() {
        assert_eq!(decide_assignee("alice", &[]), None);
    }
}
