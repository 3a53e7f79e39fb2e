//! Profile URL parsing.
//!
//! Sponsor records from Open Collective carry a free-form profile URL. The
//! automation only needs the username segment, and only if the whole string
//! has the expected shape.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ParseError;

/// Host whose profile URLs [`strip_github_name`] accepts.
pub const GITHUB_HOST: &str = "github.com";

static PROFILE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://([A-Za-z0-9.-]+)/([A-Za-z0-9_-]+)(?:/.*)?$")
        .expect("profile URL pattern is valid")
});

/// A parsed `https://<host>/<username>[/...]` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUrl {
    host: String,
    username: String,
}

impl ProfileUrl {
    /// Parses `url`, rejecting anything that does not match in full.
    pub fn parse(url: &str) -> Result<Self, ParseError> {
        let caps = PROFILE_URL_PATTERN
            .captures(url)
            .ok_or_else(|| ParseError::ProfileUrl(url.to_string()))?;
        Ok(Self {
            host: caps[1].to_ascii_lowercase(),
            username: caps[2].to_string(),
        })
    }

    /// Host name, lowercased.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// First path segment.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Consumes the URL, returning the username.
    pub fn into_username(self) -> String {
        self.username
    }
}

/// Extracts the username from a `https://github.com/<username>[/...]` URL.
pub fn strip_github_name(url: &str) -> Result<String, ParseError> {
    let profile = ProfileUrl::parse(url)?;
    if profile.host() != GITHUB_HOST {
        return Err(ParseError::UnexpectedHost {
            url: url.to_string(),
            expected_host: GITHUB_HOST.to_string(),
        });
    }
    Ok(profile.into_username())
}
