use std::collections::HashMap;

use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository};

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    /// Newest first; the first commit is HEAD
    commits: Vec<CommitInfo>,
    tags: HashMap<String, Vec<String>>,
    unavailable: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of the history; it becomes HEAD
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.commits.insert(0, CommitInfo::new(hash, message));
    }

    /// Add a tag pointing at a commit hash
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.entry(hash.into()).or_default().push(name.into());
    }

    /// Make every read fail like a missing git repository
    pub fn set_unavailable(&mut self) {
        self.unavailable = true;
    }

    fn check(&self, command: &str) -> Result<()> {
        if self.unavailable {
            return Err(ReleaseError::vcs(
                command,
                Some(128),
                "fatal: not a git repository",
            ));
        }
        Ok(())
    }
}

impl Repository for MockRepository {
    fn head_hash(&self) -> Result<String> {
        self.check("git rev-parse HEAD")?;
        self.commits
            .first()
            .map(|c| c.hash.clone())
            .ok_or_else(|| {
                ReleaseError::vcs(
                    "git rev-parse HEAD",
                    Some(128),
                    "ambiguous argument 'HEAD': unknown revision",
                )
            })
    }

    fn tags_by_commit(&self) -> Result<HashMap<String, Vec<String>>> {
        self.check("git show-ref --tags")?;
        Ok(self.tags.clone())
    }

    fn walk_history(
        &self,
        hide: Option<&str>,
        visit: &mut dyn FnMut(CommitInfo) -> bool,
    ) -> Result<()> {
        self.check("git log HEAD")?;
        // Linear history: the hidden commit ends the walk
        for commit in &self.commits {
            if hide == Some(commit.hash.as_str()) || !visit(commit.clone()) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(n: u8) -> String {
        format!("{:02x}", n).repeat(20)
    }

    #[test]
    fn test_mock_repository_head() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_commit(hash(2), "fix: second");
        assert_eq!(repo.head_hash().unwrap(), hash(2));
    }

    #[test]
    fn test_mock_repository_tags_at_head() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_tag("release", hash(1));
        repo.add_tag("1.0.0", hash(1));
        assert_eq!(
            repo.tags_at_head().unwrap(),
            vec!["1.0.0".to_string(), "release".to_string()]
        );
    }

    #[test]
    fn test_release_range_stops_at_previous_version_tag() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_tag("1.0.0", hash(1));
        repo.add_commit(hash(2), "fix: second");
        repo.add_tag("nightly", hash(2));
        repo.add_commit(hash(3), "feat: third");

        let range = repo.release_range().unwrap();
        assert_eq!(range.previous_tag.unwrap().name, "1.0.0");
        let hashes: Vec<_> = range.commits.iter().map(|c| c.hash.clone()).collect();
        assert_eq!(hashes, vec![hash(3), hash(2)]);
    }

    #[test]
    fn test_release_range_skips_tag_on_head() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_tag("1.0.0", hash(1));
        repo.add_commit(hash(2), "fix: second");
        repo.add_tag("1.0.1", hash(2));

        let range = repo.release_range().unwrap();
        assert_eq!(range.previous_tag.unwrap().name, "1.0.0");
        assert_eq!(range.commits.len(), 1);
    }

    #[test]
    fn test_release_range_without_tags_is_full_history() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_commit(hash(2), "fix: second");

        let range = repo.release_range().unwrap();
        assert!(range.previous_tag.is_none());
        assert_eq!(range.commits.len(), 2);
    }

    #[test]
    fn test_unavailable_repository() {
        let mut repo = MockRepository::new();
        repo.set_unavailable();
        assert!(matches!(
            repo.tags_at_head(),
            Err(ReleaseError::VcsUnavailable { .. })
        ));
    }
}
