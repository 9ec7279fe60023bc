use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

use super::errors::GitHubError;
use super::types::{LabeledItem, RepoLabel, WorkflowRunRecord, WorkflowRunsPage};
use crate::config::Credentials;

/// Only the first page of every listing is read.
pub const PAGE_SIZE: u8 = 100;
pub const ACCEPT_V3_JSON: &str = "application/vnd.github.v3+json";

/// Data the collector needs from the hosting platform.
///
/// Every call fetches a single page; nothing is retried.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn list_issues(&self, since: &str) -> Result<Vec<LabeledItem>, GitHubError>;
    async fn list_pull_requests(&self, since: &str) -> Result<Vec<LabeledItem>, GitHubError>;
    async fn list_workflow_runs(&self, since: &str) -> Result<Vec<WorkflowRunRecord>, GitHubError>;
    async fn list_labels(&self) -> Result<Vec<RepoLabel>, GitHubError>;
}

#[derive(Debug, Serialize)]
struct ListParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    since: &'a str,
    per_page: u8,
}

#[derive(Debug)]
pub struct GitHubClient {
    octocrab: Octocrab,
    repository: String,
}

impl GitHubClient {
    pub fn new(credentials: &Credentials, api_base_url: &str) -> Result<Self, GitHubError> {
        let octocrab = Octocrab::builder()
            .base_uri(api_base_url)?
            .add_header(AUTHORIZATION, format!("token {}", credentials.token()))
            .add_header(ACCEPT, ACCEPT_V3_JSON.to_string())
            .add_retry_config(RetryConfig::None)
            .build()?;

        Ok(GitHubClient {
            octocrab,
            repository: credentials.repository().to_string(),
        })
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    fn route(&self, resource: &str) -> String {
        format!("/repos/{}/{}", self.repository, resource)
    }

    async fn list_items(&self, resource: &str, since: &str) -> Result<Vec<LabeledItem>, GitHubError> {
        let route = self.route(resource);
        let params = ListParams {
            state: Some("all"),
            since,
            per_page: PAGE_SIZE,
        };
        debug!(route = %route, since = since, "Listing {}", resource);

        let items: Vec<LabeledItem> = self.octocrab.get(route, Some(&params)).await?;
        Ok(items)
    }
}

#[async_trait]
impl MetricsSource for GitHubClient {
    async fn list_issues(&self, since: &str) -> Result<Vec<LabeledItem>, GitHubError> {
        self.list_items("issues", since).await
    }

    async fn list_pull_requests(&self, since: &str) -> Result<Vec<LabeledItem>, GitHubError> {
        self.list_items("pulls", since).await
    }

    async fn list_workflow_runs(&self, since: &str) -> Result<Vec<WorkflowRunRecord>, GitHubError> {
        let route = self.route("actions/runs");
        let params = ListParams {
            state: None,
            since,
            per_page: PAGE_SIZE,
        };
        debug!(route = %route, since = since, "Listing workflow runs");

        let page: WorkflowRunsPage = self.octocrab.get(route, Some(&params)).await?;
        Ok(page.workflow_runs)
    }

    async fn list_labels(&self) -> Result<Vec<RepoLabel>, GitHubError> {
        let route = self.route("labels");
        debug!(route = %route, "Listing repository labels");

        let labels: Vec<RepoLabel> = self.octocrab.get(route, None::<&()>).await?;
        Ok(labels)
    }
}
