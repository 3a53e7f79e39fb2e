//! Subcommand dispatch and output rendering.

use anyhow::{anyhow, Result};
use clap::{Subcommand, ValueEnum};
use issues::{
    get_user_organisations, message_github_issue, remove_labels_from_github_issue,
    strip_github_name, Comment, IssueRef, LabelApplyResult, LabelColor, LabelName,
    LabelReconciler, Message, OrgName, RemoteIssueClient, Username,
};
use serde::Serialize;

/// What to do.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the organisations a user belongs to.
    Orgs {
        /// GitHub login.
        username: String,
    },
    /// Print the username from a `https://github.com/<username>` profile URL.
    StripName {
        /// Profile URL.
        url: String,
    },
    /// Post each message as a separate comment on an issue.
    Comment {
        /// Issue as `owner/repo#number`.
        issue: IssueRef,
        /// Comment bodies.
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Create any missing labels on the repository, then apply them all to an issue.
    Label {
        /// Issue as `owner/repo#number`.
        issue: IssueRef,
        /// Label names.
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// Remove labels from an issue.
    Unlabel {
        /// Issue as `owner/repo#number`.
        issue: IssueRef,
        /// Label names.
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

impl Command {
    /// Subcommand name, for the invocation span.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Orgs { .. } => "orgs",
            Command::StripName { .. } => "strip-name",
            Command::Comment { .. } => "comment",
            Command::Label { .. } => "label",
            Command::Unlabel { .. } => "unlabel",
        }
    }
}

/// How results are printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One item per line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Result of one subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Organisations, in the order GitHub returned them.
    Orgs { orgs: Vec<OrgName> },
    /// Username taken from a profile URL.
    Username { username: String },
    /// Posted comments, in message order.
    Comments { comments: Vec<Comment> },
    /// Labels now on the issue, and which of them had to be created.
    Labeled(LabelApplyResult),
    /// Labels removed from the issue.
    Unlabeled { removed: Vec<LabelName> },
}

impl Outcome {
    /// Renders the outcome for stdout.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(self)?);
        }

        let lines: Vec<String> = match self {
            Outcome::Orgs { orgs } => orgs.iter().map(ToString::to_string).collect(),
            Outcome::Username { username } => vec![username.clone()],
            Outcome::Comments { comments } => comments
                .iter()
                .map(|c| match &c.html_url {
                    Some(url) => format!("{}\t{url}", c.id),
                    None => c.id.to_string(),
                })
                .collect(),
            Outcome::Labeled(result) => result
                .applied
                .iter()
                .map(|label| {
                    if result.created.contains(&label.name) {
                        format!("{}\t(created)", label.name)
                    } else {
                        label.name.to_string()
                    }
                })
                .collect(),
            Outcome::Unlabeled { removed } => removed.iter().map(ToString::to_string).collect(),
        };
        Ok(lines.join("\n"))
    }
}

fn label_names(raw: &[String]) -> Result<Vec<LabelName>> {
    raw.iter()
        .map(|l| LabelName::new(l.as_str()).ok_or_else(|| anyhow!("label names must not be empty")))
        .collect()
}

fn messages(raw: &[String]) -> Result<Vec<Message>> {
    raw.iter()
        .map(|m| Message::new(m.as_str()).ok_or_else(|| anyhow!("messages must not be empty")))
        .collect()
}

/// Runs `command` against `client`.
pub async fn execute(
    command: &Command,
    client: &dyn RemoteIssueClient,
    label_color: &LabelColor,
) -> Result<Outcome> {
    let outcome = match command {
        Command::Orgs { username } => {
            let username =
                Username::new(username.as_str()).ok_or_else(|| anyhow!("username must not be empty"))?;
            Outcome::Orgs {
                orgs: get_user_organisations(client, &username).await?,
            }
        }
        Command::StripName { url } => Outcome::Username {
            username: strip_github_name(url)?,
        },
        Command::Comment { issue, messages: raw } => Outcome::Comments {
            comments: message_github_issue(client, issue, &messages(raw)?).await?,
        },
        Command::Label { issue, labels } => Outcome::Labeled(
            LabelReconciler::new(client)
                .with_color(label_color.clone())
                .reconcile(issue, &label_names(labels)?)
                .await?,
        ),
        Command::Unlabel { issue, labels } => Outcome::Unlabeled {
            removed: remove_labels_from_github_issue(client, issue, &label_names(labels)?).await?,
        },
    };
    Ok(outcome)
}
