//! Issue automation domain for collective-bot.
//!
//! This crate decides *how* a bot talks to an issue tracker: posting a batch of
//! comments, reconciling and applying labels, removing labels, resolving a
//! user's organisations, and pulling a username out of a profile URL. *What*
//! to say or label is decided by the caller.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It sequences calls through the [`RemoteIssueClient`] trait; the `github`
//! crate supplies the HTTP implementation.
//!
//! ## Concurrency
//!
//! Every batch operation fans its remote calls out on the caller's task and
//! joins them all-or-nothing (see [`fanout`]). A failed batch may already have
//! changed remote state; nothing is rolled back, retried, or timed out here.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtypes (`IssueRef`, `LabelName`, `Message`, `LabelColor`, ...) |
//! | [`types`] | Remote records (`Label`, `Comment`, `LabelApplyResult`) |
//! | [`errors`] | `IssueError` and `ParseError` |
//! | [`client`] | The `RemoteIssueClient` port |
//! | [`fanout`] | All-or-nothing join |
//! | [`labels`] | `LabelReconciler`, `LabelRemover` |
//! | [`messenger`] | `IssueMessenger` |
//! | [`orgs`] | Organisation lookup |
//! | [`profile`] | Profile URL parsing |

pub mod client;
pub mod errors;
pub mod fanout;
pub mod identifiers;
pub mod labels;
pub mod messenger;
pub mod orgs;
pub mod profile;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::RemoteIssueClient;
pub use errors::{IssueError, IssueResult, ParseError};
pub use identifiers::{
    IssueNumber, IssueRef, LabelColor, LabelName, Message, OrgName, Username, DEFAULT_LABEL_COLOR,
};
pub use labels::{label_github_issue, remove_labels_from_github_issue, LabelReconciler, LabelRemover};
pub use messenger::{message_github_issue, IssueMessenger};
pub use orgs::get_user_organisations;
pub use profile::{strip_github_name, ProfileUrl, GITHUB_HOST};
pub use types::{Comment, Label, LabelApplyResult};
