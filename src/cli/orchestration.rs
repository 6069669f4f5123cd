//! Main workflow orchestration logic
//!
//! Keeps the release resolution independent of clap so it can be driven
//! programmatically and tested against a [`MockRepository`](crate::git::MockRepository).

use tracing::{info, instrument};

use crate::analyzer::VersionAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::changelog::{ChangeLogDocument, ChangelogFormatter};
use crate::config::Config;
use crate::credentials::{self, Environment, ProjectContext};
use crate::domain::ReleaseVersion;
use crate::error::Result;
use crate::git::Repository;
use crate::publishing::RepositorySlug;
use crate::resolver::VersionResolver;

/// Result of resolving a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    /// The version to publish
    pub version: ReleaseVersion,

    /// Latest version tag before HEAD
    pub previous_tag: Option<String>,

    /// Commits in the release range, release commits included
    pub commit_count: usize,

    /// GitHub repository the release belongs to, when known
    pub repository: Option<RepositorySlug>,

    /// Release notes for the commits in the range
    pub changelog: ChangeLogDocument,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// 1. Read the tags on HEAD and the commits since the previous version tag
/// 2. Compute the fallback version from those commits
/// 3. Resolve the release version (tag on HEAD wins over the fallback)
/// 4. Format the changelog, linking commits when the repository is known
///
/// # Errors
///
/// Fails when the repository cannot be read, a versioning pattern does not
/// compile, or the configured repository is not `owner/name`.
#[instrument(skip_all)]
pub fn run_release_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    env: &dyn Environment,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    let tags_at_head = repo.tags_at_head()?;
    let range = repo.release_range()?;

    let analyzer = VersionAnalyzer::new(&config.versioning)?;
    let fallback = analyzer.compute(range.previous_tag.as_ref(), &range.commits);
    let version = VersionResolver::resolve(&tags_at_head, &fallback);

    let version_tags = VersionResolver::version_tags(&tags_at_head);
    if version_tags.len() > 1 {
        warnings.push(BoundaryWarning::MultipleVersionTags {
            tags: version_tags,
            chosen: version.to_string(),
        });
    }

    if let Some(previous) = &range.previous_tag {
        if range.commits.iter().all(|c| c.is_release()) {
            warnings.push(BoundaryWarning::NoNewCommits {
                latest_tag: previous.name.clone(),
                current_commit_hash: repo.head_hash()?,
            });
        }
    }

    let ctx = ProjectContext::new(&config.properties, env);
    let repository = credentials::release_repository(config)
        .resolve_optional(&ctx)
        .map(|slug| RepositorySlug::parse(&slug))
        .transpose()?;

    let formatter = ChangelogFormatter::new(config.changelog.clone());
    let slug_text = repository.as_ref().map(ToString::to_string);
    let changelog = formatter.format(&range.commits, slug_text.as_deref());
    warnings.extend(changelog.warnings.iter().cloned());

    info!(
        version = %version,
        previous = range.previous_tag.as_ref().map(|t| t.name.as_str()),
        commits = range.commits.len(),
        "release resolved"
    );

    Ok(WorkflowResult {
        version,
        previous_tag: range.previous_tag.map(|t| t.name),
        commit_count: range.commits.len(),
        repository,
        changelog,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use std::collections::HashMap;

    fn hash(n: u8) -> String {
        format!("{:02x}", n).repeat(20)
    }

    #[test]
    fn test_tagged_head_wins() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_tag("1.0.0", hash(1));
        repo.add_commit(hash(2), "fix: second");
        repo.add_tag("1.0.1", hash(2));

        let env: HashMap<String, String> = HashMap::new();
        let result = run_release_workflow(&repo, &Config::default(), &env).unwrap();
        assert_eq!(result.version, ReleaseVersion::Tagged("1.0.1".to_string()));
        assert_eq!(result.previous_tag.as_deref(), Some("1.0.0"));
        assert_eq!(result.commit_count, 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_untagged_head_is_computed() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_tag("1.0.0", hash(1));
        repo.add_commit(hash(2), "feat: second");

        let env: HashMap<String, String> = HashMap::new();
        let result = run_release_workflow(&repo, &Config::default(), &env).unwrap();
        assert_eq!(result.version, ReleaseVersion::Computed("1.1.0".to_string()));
    }

    #[test]
    fn test_release_commit_only_warns() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        repo.add_tag("1.0.0", hash(1));
        repo.add_commit(hash(2), "release: 1.0.0");

        let env: HashMap<String, String> = HashMap::new();
        let result = run_release_workflow(&repo, &Config::default(), &env).unwrap();
        assert_eq!(result.version.as_str(), "1.0.0");
        assert!(matches!(
            result.warnings.as_slice(),
            [BoundaryWarning::NoNewCommits { .. }]
        ));
    }

    #[test]
    fn test_invalid_repository_is_an_error() {
        let mut repo = MockRepository::new();
        repo.add_commit(hash(1), "feat: first");
        let mut config = Config::default();
        config.github.repository = Some("not-a-slug".to_string());

        let env: HashMap<String, String> = HashMap::new();
        assert!(run_release_workflow(&repo, &config, &env).is_err());
    }
}
