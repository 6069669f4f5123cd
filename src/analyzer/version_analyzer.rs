use regex::Regex;
use tracing::debug;

use crate::config::VersioningConfig;
use crate::domain::{parse_version, Commit, VersionBump, VersionTag};
use crate::error::{ReleaseError, Result};

/// Computes the next version from the commits since the last version tag
pub struct VersionAnalyzer {
    patch_pattern: Regex,
    minor_pattern: Regex,
    initial_version: semver::Version,
    default_bump: VersionBump,
}

impl VersionAnalyzer {
    /// Create a new version analyzer, compiling the configured patterns
    pub fn new(config: &VersioningConfig) -> Result<Self> {
        Ok(VersionAnalyzer {
            patch_pattern: compile("patch_pattern", &config.patch_pattern)?,
            minor_pattern: compile("minor_pattern", &config.minor_pattern)?,
            initial_version: parse_version(&config.initial_version)?,
            default_bump: config.default_bump,
        })
    }

    /// Decide the bump implied by `commits`, or `None` when nothing changed.
    ///
    /// Breaking commits bump major, messages matching the minor pattern bump
    /// minor, the patch pattern bumps patch. Release commits are ignored.
    pub fn analyze(&self, commits: &[Commit]) -> Option<VersionBump> {
        let mut relevant = commits.iter().filter(|c| !c.is_release()).peekable();
        relevant.peek()?;

        let bump = relevant
            .map(|commit| self.classify(commit))
            .max()
            .flatten()
            .unwrap_or(self.default_bump);
        Some(bump)
    }

    /// Compute the fallback version from the previous tag and the commits since.
    pub fn compute(&self, latest_tag: Option<&VersionTag>, commits: &[Commit]) -> String {
        let base = latest_tag
            .map(|tag| tag.version.clone())
            .unwrap_or_else(|| self.initial_version.clone());

        let next = match self.analyze(commits) {
            Some(bump) => bump.apply(&base),
            None => base,
        };
        debug!(
            previous = latest_tag.map(|t| t.name.as_str()),
            next = %next,
            commits = commits.len(),
            "computed fallback version"
        );
        next.to_string()
    }

    fn classify(&self, commit: &Commit) -> Option<VersionBump> {
        if commit.is_breaking {
            Some(VersionBump::Major)
        } else if self.minor_pattern.is_match(&commit.message) {
            Some(VersionBump::Minor)
        } else if self.patch_pattern.is_match(&commit.message) {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ReleaseError::config(format!("Invalid {} '{}': {}", name, pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> Commit {
        Commit::parse("0123456789abcdef0123456789abcdef01234567", message)
    }

    fn commits(messages: &[&str]) -> Vec<Commit> {
        messages.iter().map(|m| commit(m)).collect()
    }

    fn analyzer() -> VersionAnalyzer {
        VersionAnalyzer::new(&VersioningConfig::default()).unwrap()
    }

    fn tag(name: &str) -> VersionTag {
        VersionTag::parse(name).unwrap()
    }

    #[test]
    fn test_analyze_major() {
        let messages = commits(&["feat: new feature", "fix(api)!: breaking change"]);
        assert_eq!(analyzer().analyze(&messages), Some(VersionBump::Major));
    }

    #[test]
    fn test_analyze_minor() {
        let messages = commits(&["feat: new feature", "fix: bug fix"]);
        assert_eq!(analyzer().analyze(&messages), Some(VersionBump::Minor));
    }

    #[test]
    fn test_analyze_patch_pattern_types() {
        for message in [
            "fix: bug", "chore: tidy", "docs: readme", "refactor: split", "ci: cache",
            "build: gradle", "test: more", "deps: bump",
        ] {
            assert_eq!(
                analyzer().analyze(&commits(&[message])),
                Some(VersionBump::Patch),
                "{}",
                message
            );
        }
    }

    #[test]
    fn test_analyze_patch_with_scope() {
        let messages = commits(&["chore(deps): bump serde"]);
        assert_eq!(analyzer().analyze(&messages), Some(VersionBump::Patch));
    }

    #[test]
    fn test_analyze_breaking_change_via_footer() {
        let messages =
            commits(&["fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y"]);
        assert_eq!(analyzer().analyze(&messages), Some(VersionBump::Major));
    }

    #[test]
    fn test_analyze_non_conventional_uses_default_bump() {
        let messages = commits(&["Updated stuff", "Fixed things"]);
        assert_eq!(analyzer().analyze(&messages), Some(VersionBump::Patch));

        let config = VersioningConfig {
            default_bump: VersionBump::Minor,
            ..VersioningConfig::default()
        };
        let analyzer = VersionAnalyzer::new(&config).unwrap();
        assert_eq!(analyzer.analyze(&messages), Some(VersionBump::Minor));
    }

    #[test]
    fn test_analyze_no_commits() {
        assert_eq!(analyzer().analyze(&[]), None);
    }

    #[test]
    fn test_analyze_ignores_release_commits() {
        let messages = commits(&["release: 1.2.0"]);
        assert_eq!(analyzer().analyze(&messages), None);
    }

    #[test]
    fn test_compute_from_tag() {
        let messages = commits(&["feat(auth): add oauth", "fix(ui): button"]);
        assert_eq!(analyzer().compute(Some(&tag("1.1.4")), &messages), "1.2.0");
    }

    #[test]
    fn test_compute_without_tag_starts_from_initial() {
        let messages = commits(&["fix: first bug"]);
        assert_eq!(analyzer().compute(None, &messages), "0.0.1");
    }

    #[test]
    fn test_compute_without_changes_keeps_tag() {
        assert_eq!(analyzer().compute(Some(&tag("3.0.0")), &[]), "3.0.0");
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let config = VersioningConfig {
            patch_pattern: "(unclosed".to_string(),
            ..VersioningConfig::default()
        };
        let err = VersionAnalyzer::new(&config).err().unwrap();
        assert!(matches!(err, ReleaseError::Config(_)));
    }
}
