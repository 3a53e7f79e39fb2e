//! Newtype domain identifiers.
//!
//! Every value that crosses the [`crate::RemoteIssueClient`] boundary is a
//! distinct newtype wrapping a primitive. This prevents accidentally passing
//! a comment body where a label name is expected even though both
//! are `String` under the hood.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new value, returning `None` if it is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Names a repository-scoped label (e.g. `"bug"`, `"needs-triage"`).
    ///
    /// Uniqueness is enforced by the remote platform, not locally: two equal
    /// `LabelName`s refer to the same repository label.
    LabelName
}

string_id! {
    /// The body of one comment to post on an issue.
    ///
    /// Opaque to this crate. Templating happens in the caller.
    Message
}

string_id! {
    /// Login of an organisation a user belongs to.
    ///
    /// Only ever produced from remote responses.
    OrgName
}

string_id! {
    /// Login of a user account on the platform.
    Username
}

// ---------------------------------------------------------------------------
// Issue reference
// ---------------------------------------------------------------------------

/// Issue number assigned by the platform (positive integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a new issue number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

static ISSUE_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)#([0-9]+)$")
        .expect("issue reference pattern is valid")
});

/// Identifies a single issue: `owner/repo#number`.
///
/// Supplied by the caller on every call and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    /// Account (user or organisation) that owns the repository.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue number within the repository.
    pub number: IssueNumber,
}

impl IssueRef {
    /// Creates a new issue reference.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number: IssueNumber::new(number),
        }
    }
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl FromStr for IssueRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ISSUE_REF_PATTERN
            .captures(s)
            .ok_or_else(|| ParseError::IssueRef(s.to_string()))?;
        let number = caps[3]
            .parse::<u64>()
            .map_err(|_| ParseError::IssueRef(s.to_string()))?;
        Ok(Self::new(&caps[1], &caps[2], number))
    }
}

// ---------------------------------------------------------------------------
// Label colour
// ---------------------------------------------------------------------------

/// Colour assigned to labels created by the reconciler when none is configured.
pub const DEFAULT_LABEL_COLOR: &str = "fbca04";

/// A label colour: exactly six hex digits, no leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelColor(String);

impl LabelColor {
    /// Creates a colour, returning `None` unless `value` is six hex digits.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.len() == 6 && v.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(v.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Returns the colour as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LabelColor {
    fn default() -> Self {
        Self(DEFAULT_LABEL_COLOR.to_string())
    }
}

impl std::fmt::Display for LabelColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LabelColor {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value.clone()).ok_or(ParseError::LabelColor(value))
    }
}

impl From<LabelColor> for String {
    fn from(color: LabelColor) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_reject_empty_values() {
        assert!(LabelName::new("").is_none());
        assert!(Message::new(String::new()).is_none());
        assert_eq!(LabelName::new("bug").unwrap().as_str(), "bug");
    }

    #[test]
    fn issue_ref_round_trips_through_display() {
        let issue: IssueRef = "opencollective/opencollective#1234".parse().unwrap();
        assert_eq!(issue.owner, "opencollective");
        assert_eq!(issue.repo, "opencollective");
        assert_eq!(issue.number.as_u64(), 1234);
        assert_eq!(issue.to_string(), "opencollective/opencollective#1234");
    }

    #[test]
    fn issue_ref_rejects_malformed_input() {
        for input in [
            "owner/repo",
            "owner#3",
            "owner/repo#",
            "owner/repo#x",
            " a/b#1",
            "ówner/repo#1",
        ] {
            assert_eq!(
                input.parse::<IssueRef>(),
                Err(ParseError::IssueRef(input.to_string())),
                "{input}"
            );
        }
    }

    #[test]
    fn label_color_requires_six_hex_digits() {
        assert_eq!(LabelColor::default().as_str(), "fbca04");
        assert_eq!(LabelColor::new("FF00aa").unwrap().as_str(), "ff00aa");
        assert!(LabelColor::new("#fbca04").is_none());
        assert!(LabelColor::new("fbca0").is_none());
        assert!(LabelColor::new("zzzzzz").is_none());
    }
}
