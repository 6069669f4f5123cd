use regex::Regex;
use std::sync::OnceLock;

/// Commit types recognized by the classifier; anything else is [`OTHER_TYPE`].
pub const RECOGNIZED_TYPES: &[&str] = &[
    "feat", "fix", "chore", "refactor", "docs", "ci", "build", "test", "deps", "release",
];

/// Sentinel type for unrecognized or non-conventional commits
pub const OTHER_TYPE: &str = "other";

/// Synthetic version-bump commits, never shown in release notes
pub const RELEASE_TYPE: &str = "release";

const EMPTY_MESSAGE: &str = "(empty message)";

fn conventional_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<type>[a-z]+)(?:\((?P<scope>[^()]+)\))?(?P<breaking>!)?:\s*(?P<header>.*)$")
            .expect("static conventional commit pattern")
    })
}

/// A commit classified for release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full hexadecimal object id
    pub hash: String,
    /// One of [`RECOGNIZED_TYPES`] or [`OTHER_TYPE`]
    pub commit_type: String,
    /// Parenthesized subsystem label, empty when absent
    pub scope: String,
    /// First message line without the `type(scope):` prefix
    pub header: String,
    pub is_breaking: bool,
    /// Raw message as read from the repository
    pub message: String,
}

impl Commit {
    /// Build a commit from already classified parts.
    ///
    /// Unknown types are normalized to `other` and an empty header falls back
    /// to a placeholder.
    pub fn new(
        hash: impl Into<String>,
        commit_type: &str,
        scope: impl Into<String>,
        header: impl Into<String>,
        is_breaking: bool,
    ) -> Self {
        let header = header.into();
        let message = header.clone();
        Commit {
            hash: hash.into(),
            commit_type: normalize_type(commit_type).to_string(),
            scope: scope.into(),
            header: if header.trim().is_empty() {
                EMPTY_MESSAGE.to_string()
            } else {
                header
            },
            is_breaking,
            message,
        }
    }

    /// Classify a raw commit message.
    ///
    /// Supports formats:
    /// - type(scope)!: header
    /// - type(scope): header
    /// - type!: header
    /// - type: header
    /// - non-conventional text (classified as `other`)
    ///
    /// Matching is case-sensitive and anchored at the start of the message.
    pub fn parse(hash: impl Into<String>, message: &str) -> Self {
        let first_line = message.lines().next().unwrap_or("").trim_end();
        let footer_breaking = has_breaking_footer(message);

        let classified = conventional_regex().captures(first_line).and_then(|caps| {
            let commit_type = caps.name("type")?.as_str();
            if !RECOGNIZED_TYPES.contains(&commit_type) {
                return None;
            }
            let scope = caps.name("scope").map(|m| m.as_str()).unwrap_or("");
            let breaking = caps.name("breaking").is_some();
            let header = caps.name("header").map(|m| m.as_str()).unwrap_or("");
            Some((commit_type, scope, breaking, header))
        });

        let (commit_type, scope, marker, header) = match classified {
            Some(parts) => parts,
            None => (OTHER_TYPE, "", false, first_line),
        };

        let header = if !header.trim().is_empty() {
            header.trim()
        } else if !first_line.trim().is_empty() {
            first_line.trim()
        } else {
            EMPTY_MESSAGE
        };

        Commit {
            hash: hash.into(),
            commit_type: commit_type.to_string(),
            scope: scope.trim().to_string(),
            header: header.to_string(),
            is_breaking: marker || footer_breaking,
            message: message.to_string(),
        }
    }

    pub fn is_release(&self) -> bool {
        self.commit_type == RELEASE_TYPE
    }
}

fn normalize_type(commit_type: &str) -> &str {
    RECOGNIZED_TYPES
        .iter()
        .find(|known| **known == commit_type)
        .copied()
        .unwrap_or(OTHER_TYPE)
}

fn has_breaking_footer(message: &str) -> bool {
    message
        .lines()
        .any(|line| line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:"))
}
