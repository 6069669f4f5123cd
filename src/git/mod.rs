//! Version control readers
//!
//! This module provides a trait-based abstraction over the few git reads a
//! release needs, allowing for multiple implementations including libgit2,
//! the `git` command line and a mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. Implementations only
//! supply three primitives (HEAD hash, tags keyed by commit, a history walk);
//! the release-level reads are provided on top of them:
//!
//! - [repository::Git2Repository]: libgit2 through the `git2` crate
//! - [command::GitCli]: spawns `git` and parses its output
//! - [mock::MockRepository]: in-memory history for tests
//!
//! Every read failure surfaces as [crate::error::ReleaseError::VcsUnavailable].
//!
//! ```rust
//! # use github_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> github_release::Result<()> {
//! let range = repo.release_range()?;
//! println!("{} commits since {:?}", range.commits.len(), range.previous_tag);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCli;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::collections::HashMap;

use crate::domain::{Commit, VersionTag};
use crate::error::Result;

/// Raw commit as read from version control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The complete commit message
    pub message: String,
}

impl CommitInfo {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitInfo {
            hash: hash.into(),
            message: message.into(),
        }
    }
}

/// Commits that make up the release being built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseRange {
    /// Nearest version tag on an ancestor of HEAD (tags on HEAD itself excluded)
    pub previous_tag: Option<VersionTag>,
    /// Commits reachable from HEAD but not from `previous_tag`, newest first
    pub commits: Vec<Commit>,
}

/// Version control operations needed to resolve a release
pub trait Repository {
    /// Full hash of the commit at HEAD
    fn head_hash(&self) -> Result<String>;

    /// Tag names keyed by the full hash of the commit they point at.
    ///
    /// Annotated tags are peeled to their commit.
    fn tags_by_commit(&self) -> Result<HashMap<String, Vec<String>>>;

    /// Visit commits reachable from HEAD, newest first, until `visit` returns false.
    ///
    /// With `hide`, that commit and its ancestors are excluded, like
    /// `git log <hide>..HEAD`.
    fn walk_history(
        &self,
        hide: Option<&str>,
        visit: &mut dyn FnMut(CommitInfo) -> bool,
    ) -> Result<()>;

    /// All tags pointing at HEAD
    fn tags_at_head(&self) -> Result<Vec<String>> {
        let head = self.head_hash()?;
        let mut tags = self.tags_by_commit()?.remove(&head).unwrap_or_default();
        tags.sort();
        Ok(tags)
    }

    /// Previous version tag and the commits since it.
    ///
    /// The range is everything reachable from HEAD but not from the tagged
    /// commit, so branches merged after the tag keep their commits.
    fn release_range(&self) -> Result<ReleaseRange> {
        let head = self.head_hash()?;
        let tags = self.tags_by_commit()?;

        let mut previous: Option<(String, VersionTag)> = None;
        self.walk_history(None, &mut |info| {
            if info.hash == head {
                return true;
            }
            match tags.get(&info.hash).and_then(|names| highest_version_tag(names)) {
                Some(tag) => {
                    previous = Some((info.hash, tag));
                    false
                }
                None => true,
            }
        })?;

        let mut commits = Vec::new();
        let hide = previous.as_ref().map(|(hash, _)| hash.as_str());
        self.walk_history(hide, &mut |info| {
            commits.push(Commit::parse(info.hash, &info.message));
            true
        })?;

        Ok(ReleaseRange {
            previous_tag: previous.map(|(_, tag)| tag),
            commits,
        })
    }

    /// Nearest version tag before HEAD, if any
    fn previous_version_tag(&self) -> Result<Option<VersionTag>> {
        Ok(self.release_range()?.previous_tag)
    }

    /// Commits since the previous version tag (or the full history), newest first
    fn commits_since_last_version_tag(&self) -> Result<Vec<Commit>> {
        Ok(self.release_range()?.commits)
    }
}

/// Highest strict version tag among `names`
pub fn highest_version_tag(names: &[String]) -> Option<VersionTag> {
    names
        .iter()
        .filter_map(|name| VersionTag::parse(name))
        .max_by(|a, b| a.version.cmp(&b.version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_version_tag_ignores_other_tags() {
        let names = vec![
            "latest".to_string(),
            "1.2.0".to_string(),
            "1.10.0".to_string(),
            "v9.9.9".to_string(),
        ];
        assert_eq!(highest_version_tag(&names).unwrap().name, "1.10.0");
    }

    #[test]
    fn test_highest_version_tag_none() {
        assert!(highest_version_tag(&["nightly".to_string()]).is_none());
    }
}
