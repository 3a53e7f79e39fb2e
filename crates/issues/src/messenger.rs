//! Batch comment posting.

use tracing::{debug, instrument, warn};

use crate::fanout::join_all_or_first_error;
use crate::{Comment, IssueRef, IssueResult, Message, RemoteIssueClient};

/// Posts messages as comments on an issue.
pub struct IssueMessenger<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: RemoteIssueClient + ?Sized> IssueMessenger<'a, C> {
    /// Creates a messenger backed by `client`.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Posts each message as a separate comment.
    ///
    /// All comments are created concurrently, so they may land on the issue in
    /// any order. The returned comments follow the order of `messages`. If any
    /// comment fails the whole call fails; comments already created stay.
    #[instrument(
        skip(self, issue, messages),
        fields(owner = %issue.owner, repo = %issue.repo, issue = %issue.number, messages = messages.len())
    )]
    pub async fn post(&self, issue: &IssueRef, messages: &[Message]) -> IssueResult<Vec<Comment>> {
        let comments = join_all_or_first_error(messages.iter().enumerate().map(
            |(index, message)| async move {
                self.client
                    .create_comment(issue, message)
                    .await
                    .inspect_err(|err| warn!(index, error = %err, "comment creation failed"))
            },
        ))
        .await?;

        debug!("comments posted");
        Ok(comments)
    }
}

/// Posts every message in `messages` as a comment on `issue`.
pub async fn message_github_issue<C: RemoteIssueClient + ?Sized>(
    client: &C,
    issue: &IssueRef,
    messages: &[Message],
) -> IssueResult<Vec<Comment>> {
    IssueMessenger::new(client).post(issue, messages).await
}
