//! collective-bot GitHub infrastructure adapter.
//!
//! Implements the [`issues::RemoteIssueClient`] port against the GitHub REST
//! API with [`reqwest`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. URL building,
//! headers, payload shapes, and status-code mapping live here; the [`issues`]
//! crate never sees them.
//!
//! ## Error Mapping
//!
//! | Response | [`issues::IssueError`] |
//! |----------|------------------------|
//! | 2xx | success |
//! | 404 | `NotFound` |
//! | any other status | `RemoteApi { status: Some(..) }` with the API's `message` |
//! | transport / decode failure | `RemoteApi { status: None }` |
//!
//! ## Gaps
//!
//! There is no retry, rate-limit back-off, pagination, or credential refresh.
//! A token, when configured, is sent verbatim as a bearer token.

pub mod client;
mod wire;

pub use client::{GithubClient, GithubClientError, GithubConfig, DEFAULT_API_BASE_URL};
