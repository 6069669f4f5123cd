use std::fmt;

/// Non-fatal conditions met while resolving a release.
/// These degrade the output instead of aborting and are reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// No new commits since the latest version tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// More than one version tag points at HEAD
    MultipleVersionTags { tags: Vec<String>, chosen: String },
    /// Commit hash too short to abbreviate; rendered in full instead
    MalformedCommit { hash: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = current_commit_hash
                    .char_indices()
                    .nth(7)
                    .map(|(end, _)| &current_commit_hash[..end])
                    .unwrap_or(current_commit_hash.as_str());
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::MultipleVersionTags { tags, chosen } => {
                write!(
                    f,
                    "Multiple version tags at HEAD ({}); using '{}'",
                    tags.join(", "),
                    chosen
                )
            }
            BoundaryWarning::MalformedCommit { hash } => {
                write!(
                    f,
                    "Commit hash '{}' is too short to abbreviate; using it in full",
                    hash
                )
            }
        }
    }
}
