//! [`GithubClient`]: the REST implementation of [`RemoteIssueClient`].

use async_trait::async_trait;
use issues::{
    Comment, IssueError, IssueRef, IssueResult, Label, LabelColor, LabelName, Message, OrgName,
    RemoteIssueClient, Username,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::wire::{
    AddLabelsRequest, CommentResponse, CreateCommentRequest, CreateLabelRequest, ErrorResponse,
    LabelResponse, OrgResponse,
};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// REST root, e.g. `https://api.github.com` or `https://ghe.example.com/api/v3`.
    pub api_base_url: String,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
    /// `User-Agent` header value; GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            user_agent: concat!("collective-bot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Errors raised while constructing a [`GithubClient`].
#[derive(Debug, Error)]
pub enum GithubClientError {
    /// The configured base URL cannot have path segments appended.
    #[error("Invalid GitHub API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// GitHub REST client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Builds a client from `config`.
    pub fn new(config: GithubConfig) -> Result<Self, GithubClientError> {
        let base = Url::parse(&config.api_base_url)
            .map_err(|_| GithubClientError::InvalidBaseUrl(config.api_base_url.clone()))?;
        if base.cannot_be_a_base() {
            return Err(GithubClientError::InvalidBaseUrl(config.api_base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base,
            token: config.token,
        })
    }

    /// Appends percent-encoded `segments` to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `repos/{owner}/{repo}/{tail...}`
    fn repo_endpoint(&self, issue: &IssueRef, tail: &[&str]) -> Url {
        let mut segments = vec!["repos", issue.owner.as_str(), issue.repo.as_str()];
        segments.extend_from_slice(tail);
        self.endpoint(&segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-2xx statuses onto [`IssueError`].
    ///
    /// `resource` describes what a 404 means for this call.
    async fn send(
        &self,
        builder: RequestBuilder,
        resource: impl Fn() -> String,
    ) -> IssueResult<Response> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "github response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(IssueError::not_found(resource()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        warn!(status = status.as_u16(), message = %message, "github request failed");
        Err(IssueError::remote(Some(status.as_u16()), message))
    }
}

fn transport_error(err: reqwest::Error) -> IssueError {
    IssueError::remote(err.status().map(|s| s.as_u16()), err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> IssueResult<T> {
    response.json::<T>().await.map_err(|err| {
        IssueError::remote(None, format!("undecodable GitHub response: {err}"))
    })
}

fn repo_resource(issue: &IssueRef, what: String) -> String {
    format!("{what} in {}/{}", issue.owner, issue.repo)
}

#[async_trait]
impl RemoteIssueClient for GithubClient {
    #[instrument(skip_all, fields(owner = %issue.owner, repo = %issue.repo, label = %name))]
    async fn get_label(&self, issue: &IssueRef, name: &LabelName) -> IssueResult<Label> {
        let url = self.repo_endpoint(issue, &["labels", name.as_str()]);
        let response = self
            .send(self.request(Method::GET, url), || {
                repo_resource(issue, format!("label '{name}'"))
            })
            .await?;
        decode::<LabelResponse>(response).await?.try_into()
    }

    #[instrument(skip_all, fields(owner = %issue.owner, repo = %issue.repo, label = %name, color = %color))]
    async fn create_label(
        &self,
        issue: &IssueRef,
        name: &LabelName,
        color: &LabelColor,
    ) -> IssueResult<Label> {
        let url = self.repo_endpoint(issue, &["labels"]);
        let body = CreateLabelRequest {
            name: name.as_str(),
            color: color.as_str(),
        };
        let response = self
            .send(self.request(Method::POST, url).json(&body), || {
                repo_resource(issue, "repository".to_string())
            })
            .await?;
        decode::<LabelResponse>(response).await?.try_into()
    }

    #[instrument(skip_all, fields(owner = %issue.owner, repo = %issue.repo, issue = %issue.number))]
    async fn add_labels(&self, issue: &IssueRef, labels: &[LabelName]) -> IssueResult<Vec<Label>> {
        let number = issue.number.to_string();
        let url = self.repo_endpoint(issue, &["issues", number.as_str(), "labels"]);
        let body = AddLabelsRequest {
            labels: labels.iter().map(LabelName::as_str).collect(),
        };
        let response = self
            .send(self.request(Method::POST, url).json(&body), || {
                repo_resource(issue, format!("issue #{number}"))
            })
            .await?;
        decode::<Vec<LabelResponse>>(response)
            .await?
            .into_iter()
            .map(Label::try_from)
            .collect()
    }

    #[instrument(skip_all, fields(owner = %issue.owner, repo = %issue.repo, issue = %issue.number, label = %name))]
    async fn remove_label(&self, issue: &IssueRef, name: &LabelName) -> IssueResult<()> {
        let number = issue.number.to_string();
        let url = self.repo_endpoint(issue, &["issues", number.as_str(), "labels", name.as_str()]);
        self.send(self.request(Method::DELETE, url), || {
            repo_resource(issue, format!("label '{name}' on issue #{number}"))
        })
        .await?;
        Ok(())
    }

    #[instrument(skip_all, fields(owner = %issue.owner, repo = %issue.repo, issue = %issue.number))]
    async fn create_comment(&self, issue: &IssueRef, body: &Message) -> IssueResult<Comment> {
        let number = issue.number.to_string();
        let url = self.repo_endpoint(issue, &["issues", number.as_str(), "comments"]);
        let payload = CreateCommentRequest {
            body: body.as_str(),
        };
        let response = self
            .send(self.request(Method::POST, url).json(&payload), || {
                repo_resource(issue, format!("issue #{number}"))
            })
            .await?;
        Ok(decode::<CommentResponse>(response).await?.into())
    }

    #[instrument(skip_all, fields(username = %username))]
    async fn list_orgs_for_user(&self, username: &Username) -> IssueResult<Vec<OrgName>> {
        let url = self.endpoint(&["users", username.as_str(), "orgs"]);
        let response = self
            .send(self.request(Method::GET, url), || format!("user '{username}'"))
            .await?;
        decode::<Vec<OrgResponse>>(response)
            .await?
            .into_iter()
            .map(OrgName::try_from)
            .collect()
    }
}
