//! The remote issue-tracker port.
//!
//! [`RemoteIssueClient`] is the exact capability set the operations in this
//! crate need from the platform. It is always injected as a parameter; there is
//! no global client.

use async_trait::async_trait;

use crate::{
    Comment, IssueRef, IssueResult, Label, LabelColor, LabelName, Message, OrgName, Username,
};

/// Label, comment, and organisation calls against the remote platform.
///
/// Implementations must report a missing label as
/// [`IssueError::NotFound`](crate::IssueError::NotFound) from
/// [`get_label`](Self::get_label) and [`remove_label`](Self::remove_label);
/// the label reconciler relies on that signal. Every other failure is reported
/// as [`IssueError::RemoteApi`](crate::IssueError::RemoteApi).
#[async_trait]
pub trait RemoteIssueClient: Send + Sync {
    /// Looks up a repository label by name.
    async fn get_label(&self, issue: &IssueRef, name: &LabelName) -> IssueResult<Label>;

    /// Creates a repository label.
    async fn create_label(
        &self,
        issue: &IssueRef,
        name: &LabelName,
        color: &LabelColor,
    ) -> IssueResult<Label>;

    /// Attaches labels to the issue. Re-adding an attached label is a no-op.
    ///
    /// Returns the labels attached to the issue afterwards.
    async fn add_labels(&self, issue: &IssueRef, labels: &[LabelName]) -> IssueResult<Vec<Label>>;

    /// Detaches one label from the issue.
    async fn remove_label(&self, issue: &IssueRef, name: &LabelName) -> IssueResult<()>;

    /// Appends a comment to the issue.
    async fn create_comment(&self, issue: &IssueRef, body: &Message) -> IssueResult<Comment>;

    /// Lists the organisations `username` belongs to, in remote order.
    async fn list_orgs_for_user(&self, username: &Username) -> IssueResult<Vec<OrgName>>;
}
