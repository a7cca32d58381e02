use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use crate::{error::TriageError, events::GitHubUser};

const API_ROOT: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const PER_PAGE: usize = 100;

/// Thin client over the GitHub REST API.
///
/// Built once per run from the access token handed to the process; the token
/// is passed through unexamined.
pub struct GitHubClient {
    client: Client,
    token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct Review {
    // reviews still being written have no user attached
    pub user: Option<GitHubUser>,
    pub state: ReviewState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

#[derive(Debug, Serialize)]
struct SetLabelsRequest<'a> {
    labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct UpdateAssigneesRequest<'a> {
    assignees: &'a [String],
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pr-triage/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("couldn't build HTTP client")?;

        Ok(Self { client, token })
    }

    /// Fetches every file touched by the pull request.
    pub async fn list_changed_files(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<ChangedFile>> {
        let url = format!("{}/repos/{}/{}/pulls/{}/files", API_ROOT, owner, repo, number);
        debug!("fetching changed files for {}/{}#{}", owner, repo, number);

        self.get_paginated(&url)
            .await
            .context("couldn't list changed files")
    }

    /// Fetches every review on the pull request, in the order GitHub returns
    /// them (oldest first).
    pub async fn list_reviews(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Review>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            API_ROOT, owner, repo, number
        );
        debug!("fetching reviews for {}/{}#{}", owner, repo, number);

        self.get_paginated(&url).await.context("couldn't list reviews")
    }

    /// Replaces the whole label set of the pull request.
    pub async fn set_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/labels",
            API_ROOT, owner, repo, number
        );
        info!("setting labels of {}/{}#{} to {:?}", owner, repo, number, labels);

        let response = self
            .authed(self.client.put(&url))
            .json(&SetLabelsRequest { labels })
            .send()
            .await
            .context("couldn't send label update")?;
        Self::check(response).await?;

        Ok(())
    }

    /// Replaces the whole assignee set of the pull request. An empty slice
    /// leaves the pull request unassigned.
    pub async fn update_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<()> {
        let url = format!("{}/repos/{}/{}/issues/{}", API_ROOT, owner, repo, number);
        info!(
            "setting assignees of {}/{}#{} to {:?}",
            owner, repo, number, assignees
        );

        let response = self
            .authed(self.client.patch(&url))
            .json(&UpdateAssigneesRequest { assignees })
            .send()
            .await
            .context("couldn't send assignee update")?;
        Self::check(response).await?;

        Ok(())
    }

    async fn get_paginated<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let response = self
                .authed(self.client.get(url))
                .query(&[("page", page), ("per_page", PER_PAGE)])
                .send()
                .await
                .context("couldn't reach the GitHub API")?;

            let page_items: Vec<T> = Self::check(response)
                .await?
                .json()
                .await
                .context("couldn't decode GitHub API response")?;

            let short_page = page_items.len() < PER_PAGE;
            items.extend(page_items);
            if short_page {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", ACCEPT_HEADER)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TriageError::Gateway { status, body }.into())
    }
}
