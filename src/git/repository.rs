use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Repository as Git2Repo, Sort};
use tracing::{debug, instrument};

use crate::error::{ReleaseError, Result};
use crate::git::CommitInfo;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            ReleaseError::from_git2(format!("git -C {} rev-parse --git-dir", path.display()), e)
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn head_hash(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .and_then(|r| r.peel_to_commit())
            .map_err(|e| ReleaseError::from_git2("git rev-parse HEAD", e))?;
        Ok(head.id().to_string())
    }

    #[instrument(skip(self))]
    fn tags_by_commit(&self) -> Result<HashMap<String, Vec<String>>> {
        let command = "git show-ref --tags --dereference";
        let names = self
            .repo
            .tag_names(None)
            .map_err(|e| ReleaseError::from_git2(command, e))?;

        let mut tags: HashMap<String, Vec<String>> = HashMap::new();
        for name in names.iter().flatten() {
            let reference = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .map_err(|e| ReleaseError::from_git2(command, e))?;
            // Tags on trees or blobs cannot version a commit
            let Ok(commit) = reference.peel_to_commit() else {
                debug!(tag = name, "skipping tag that does not point at a commit");
                continue;
            };
            tags.entry(commit.id().to_string())
                .or_default()
                .push(name.to_string());
        }

        debug!(commits = tags.len(), "collected tags");
        Ok(tags)
    }

    #[instrument(skip(self, visit))]
    fn walk_history(
        &self,
        hide: Option<&str>,
        visit: &mut dyn FnMut(CommitInfo) -> bool,
    ) -> Result<()> {
        let command_line = match hide {
            Some(hash) => format!("git log {}..HEAD", hash),
            None => "git log HEAD".to_string(),
        };
        let command = command_line.as_str();
        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(|e| ReleaseError::from_git2(command, e))?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(|e| ReleaseError::from_git2(command, e))?;
        revwalk
            .push_head()
            .map_err(|e| ReleaseError::from_git2(command, e))?;
        if let Some(hash) = hide {
            let oid = Oid::from_str(hash).map_err(|e| ReleaseError::from_git2(command, e))?;
            revwalk
                .hide(oid)
                .map_err(|e| ReleaseError::from_git2(command, e))?;
        }

        for oid in revwalk {
            let oid = oid.map_err(|e| ReleaseError::from_git2(command, e))?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(|e| ReleaseError::from_git2(command, e))?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

            if !visit(CommitInfo::new(oid.to_string(), message)) {
                break;
            }
        }

        Ok(())
    }
}
