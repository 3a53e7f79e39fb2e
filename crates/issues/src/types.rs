//! Remote records returned through the [`crate::RemoteIssueClient`] port.
//!
//! These mirror the subset of the platform's response payloads that callers
//! act on. None of them is cached; each is discarded once the call resolves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{LabelColor, LabelName};

/// A repository-scoped label as reported by the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: LabelName,
    /// Label colour.
    pub color: LabelColor,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// A comment created on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Platform-assigned comment id.
    pub id: u64,
    /// Comment body as stored by the platform.
    pub body: String,
    /// Browser URL of the comment, when reported.
    pub html_url: Option<String>,
    /// Creation time, when reported.
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of a successful label reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelApplyResult {
    /// Labels attached to the issue after the apply step, as reported by the
    /// remote platform.
    pub applied: Vec<Label>,
    /// Requested labels that were missing from the repository and created,
    /// in request order.
    pub created: Vec<LabelName>,
}
