//! REST payloads and their conversion into domain records.

use chrono::{DateTime, Utc};
use issues::{Comment, IssueError, IssueResult, Label, LabelColor, LabelName, OrgName};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreateLabelRequest<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddLabelsRequest<'a> {
    pub labels: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCommentRequest<'a> {
    pub body: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelResponse {
    name: String,
    color: String,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<LabelResponse> for Label {
    type Error = IssueError;

    fn try_from(raw: LabelResponse) -> IssueResult<Self> {
        let name = LabelName::new(raw.name)
            .ok_or_else(|| IssueError::remote(None, "label in response has an empty name"))?;
        let color = LabelColor::new(raw.color.clone()).ok_or_else(|| {
            IssueError::remote(None, format!("label '{name}' has invalid colour '{}'", raw.color))
        })?;
        Ok(Label {
            name,
            color,
            description: raw.description,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    id: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<CommentResponse> for Comment {
    fn from(raw: CommentResponse) -> Self {
        Comment {
            id: raw.id,
            body: raw.body.unwrap_or_default(),
            html_url: raw.html_url,
            created_at: raw.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrgResponse {
    login: String,
}

impl TryFrom<OrgResponse> for OrgName {
    type Error = IssueError;

    fn try_from(raw: OrgResponse) -> IssueResult<Self> {
        OrgName::new(raw.login)
            .ok_or_else(|| IssueError::remote(None, "organisation in response has an empty login"))
    }
}

/// Error body GitHub returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
}
