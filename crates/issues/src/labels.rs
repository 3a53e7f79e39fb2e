//! Label reconciliation and removal.
//!
//! [`LabelReconciler`] makes sure every requested label exists on the
//! repository before attaching the whole set to an issue:
//!
//! 1. look up each distinct label concurrently;
//! 2. create the ones reported missing ([`crate::IssueError::NotFound`]) with the
//!    configured colour, concurrently;
//! 3. join: any other lookup error, or any creation error, fails the whole
//!    operation before anything is attached;
//! 4. attach the complete requested set with a single `add_labels` call.
//!
//! Labels created in step 2 are never rolled back when a sibling branch fails.
//!
//! Two reconciliations running at the same time over overlapping label sets
//! can both see a label as missing and both try to create it. Only one
//! creation wins; the loser's error propagates like any other. Nothing here
//! coordinates between invocations.

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::fanout::join_all_or_first_error;
use crate::{IssueRef, IssueResult, LabelApplyResult, LabelColor, LabelName, RemoteIssueClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Existing,
    Created,
}

/// Ensures labels exist on a repository, then applies them to an issue.
pub struct LabelReconciler<'a, C: ?Sized> {
    client: &'a C,
    color: LabelColor,
}

impl<'a, C: RemoteIssueClient + ?Sized> LabelReconciler<'a, C> {
    /// Creates a reconciler that creates missing labels with
    /// [`DEFAULT_LABEL_COLOR`](crate::DEFAULT_LABEL_COLOR).
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            color: LabelColor::default(),
        }
    }

    /// Overrides the colour used for labels created during reconciliation.
    pub fn with_color(mut self, color: LabelColor) -> Self {
        self.color = color;
        self
    }

    /// Runs the reconcile-then-apply protocol for `labels` on `issue`.
    #[instrument(
        skip(self, issue, labels),
        fields(owner = %issue.owner, repo = %issue.repo, issue = %issue.number, labels = labels.len())
    )]
    pub async fn reconcile(
        &self,
        issue: &IssueRef,
        labels: &[LabelName],
    ) -> IssueResult<LabelApplyResult> {
        let mut seen = HashSet::new();
        let distinct: Vec<&LabelName> = labels.iter().filter(|l| seen.insert(*l)).collect();
        debug!(distinct = distinct.len(), "checking labels exist");

        let presence =
            join_all_or_first_error(distinct.iter().map(|name| self.ensure_exists(issue, name)))
                .await?;

        let created: Vec<LabelName> = distinct
            .into_iter()
            .zip(presence)
            .filter(|(_, p)| *p == Presence::Created)
            .map(|(name, _)| name.clone())
            .collect();

        let applied = self.client.add_labels(issue, labels).await.inspect_err(|err| {
            warn!(error = %err, "applying labels failed");
        })?;
        info!(created = created.len(), applied = applied.len(), "labels applied");

        Ok(LabelApplyResult { applied, created })
    }

    async fn ensure_exists(&self, issue: &IssueRef, name: &LabelName) -> IssueResult<Presence> {
        match self.client.get_label(issue, name).await {
            Ok(_) => Ok(Presence::Existing),
            Err(err) if err.is_not_found() => {
                info!(label = %name, color = %self.color, "creating missing label");
                self.client
                    .create_label(issue, name, &self.color)
                    .await
                    .inspect_err(|err| warn!(label = %name, error = %err, "label creation failed"))?;
                Ok(Presence::Created)
            }
            Err(err) => {
                warn!(label = %name, error = %err, "label lookup failed");
                Err(err)
            }
        }
    }
}

/// Detaches labels from an issue.
pub struct LabelRemover<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: RemoteIssueClient + ?Sized> LabelRemover<'a, C> {
    /// Creates a remover backed by `client`.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Removes every label in `labels` concurrently.
    ///
    /// Returns the requested labels on success. A label that is not attached
    /// fails the whole call with [`crate::IssueError::NotFound`]; labels already
    /// removed by sibling branches stay removed.
    #[instrument(
        skip(self, issue, labels),
        fields(owner = %issue.owner, repo = %issue.repo, issue = %issue.number, labels = labels.len())
    )]
    pub async fn remove(&self, issue: &IssueRef, labels: &[LabelName]) -> IssueResult<Vec<LabelName>> {
        join_all_or_first_error(labels.iter().map(|name| async move {
            self.client
                .remove_label(issue, name)
                .await
                .inspect_err(|err| warn!(label = %name, error = %err, "label removal failed"))
        }))
        .await?;

        debug!("labels removed");
        Ok(labels.to_vec())
    }
}

/// Ensures every label in `labels` exists on the repository, creating missing
/// ones with the default colour, then attaches them all to `issue`.
pub async fn label_github_issue<C: RemoteIssueClient + ?Sized>(
    client: &C,
    issue: &IssueRef,
    labels: &[LabelName],
) -> IssueResult<LabelApplyResult> {
    LabelReconciler::new(client).reconcile(issue, labels).await
}

/// Removes `labels` from `issue`, returning them on success.
pub async fn remove_labels_from_github_issue<C: RemoteIssueClient + ?Sized>(
    client: &C,
    issue: &IssueRef,
    labels: &[LabelName],
) -> IssueResult<Vec<LabelName>> {
    LabelRemover::new(client).remove(issue, labels).await
}
