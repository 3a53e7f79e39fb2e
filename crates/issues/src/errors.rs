//! Error types for issue automation.
//!
//! [`IssueError`] is the single error type returned across the
//! [`crate::RemoteIssueClient`] boundary and by every operation in this crate.
//! Adapters map their transport-level failures into it.
//!
//! Exactly one place recovers from an error locally: the label reconciler
//! treats [`IssueError::NotFound`] from a label lookup as "create it". Every
//! other failure propagates unmodified to the caller of the enclosing batch.

use thiserror::Error;

/// Input that does not have the expected textual shape.
///
/// Never recovered; malformed input is never parsed "best effort".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string is not a `https://<host>/<username>[/...]` profile URL.
    #[error("Couldn't parse profile URL {0}")]
    ProfileUrl(String),

    /// The profile URL is well formed but points at an unexpected host.
    #[error("Profile URL {url} is not on {expected_host}")]
    UnexpectedHost {
        /// The URL that was supplied.
        url: String,
        /// The host the caller required.
        expected_host: String,
    },

    /// The string is not an `owner/repo#number` issue reference.
    #[error("Couldn't parse issue reference {0}, expected owner/repo#number")]
    IssueRef(String),

    /// The string is not six hex digits.
    #[error("Invalid label colour {0}, expected six hex digits without '#'")]
    LabelColor(String),
}

/// Errors produced by remote issue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// Local input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The remote resource does not exist (label missing from the repository,
    /// or not attached to the issue).
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource, e.g. `label 'bug' on owner/repo`.
        resource: String,
    },

    /// Any other remote failure: transport, permission, rate limit, conflict,
    /// or an undecodable response.
    #[error("Remote API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    RemoteApi {
        /// HTTP status, when the failure carried one.
        status: Option<u16>,
        /// Message reported by the remote API or the transport.
        message: String,
    },
}

impl IssueError {
    /// Creates a [`IssueError::NotFound`] for `resource`.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a [`IssueError::RemoteApi`].
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            status,
            message: message.into(),
        }
    }

    /// Returns `true` for the recognised "does not exist" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for issue operations.
pub type IssueResult<T> = Result<T, IssueError>;
