//! Release notes formatter
//!
//! Groups commits so readers see breaking changes first, then features, fixes
//! and refactors, then every other recognized category, and finally whatever
//! could not be categorized. Nothing except release commits is dropped.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use super::document::{ChangeLogDocument, Section};
use crate::boundary::BoundaryWarning;
use crate::config::ChangelogConfig;
use crate::domain::Commit;
use crate::error::{ReleaseError, Result};

/// Types that always get their own section, in this order
pub const PRIMARY_TYPES: &[&str] = &["feat", "fix", "refactor"];

/// Base URL of commit links
pub const GITHUB_WEB_BASE: &str = "https://www.github.com";

const SHORT_HASH_LEN: usize = 8;
const LONG_HASH_LEN: usize = 40;
const SCOPE_SEPARATOR: &str = ": ";

/// Turns the commits of a release into a [`ChangeLogDocument`]
#[derive(Debug, Clone)]
pub struct ChangelogFormatter {
    config: ChangelogConfig,
}

impl ChangelogFormatter {
    pub fn new(config: ChangelogConfig) -> Self {
        ChangelogFormatter { config }
    }

    /// Format `commits` (newest first).
    ///
    /// Entries link to `https://www.github.com/<slug>/commit/<hash>` when a
    /// repository slug is given. A breaking commit is listed under the
    /// breaking changes section and again in its own category.
    #[instrument(skip_all, fields(commits = commits.len(), linked = repository_slug.is_some()))]
    pub fn format(&self, commits: &[Commit], repository_slug: Option<&str>) -> ChangeLogDocument {
        let link_base = repository_slug
            .filter(|slug| !slug.is_empty())
            .map(|slug| format!("{}/{}", GITHUB_WEB_BASE, slug));
        let mut render = EntryRenderer {
            link_base: link_base.as_deref(),
            warnings: Vec::new(),
        };

        let visible: Vec<&Commit> = commits.iter().filter(|c| !c.is_release()).collect();
        let mut emitted = vec![false; visible.len()];
        let mut sections = Vec::new();

        let breaking: Vec<usize> = (0..visible.len())
            .filter(|&i| visible[i].is_breaking)
            .collect();
        if !breaking.is_empty() {
            let mut section = Section::new(&self.config.breaking_change);
            section.entries = breaking.iter().map(|&i| render.entry(visible[i])).collect();
            sections.push(section);
        }

        for &commit_type in PRIMARY_TYPES {
            let members: Vec<usize> = (0..visible.len())
                .filter(|&i| visible[i].commit_type == commit_type)
                .collect();
            if members.is_empty() {
                continue;
            }
            let title = self
                .config
                .header_text_for(commit_type)
                .unwrap_or(commit_type);
            sections.push(self.grouped_section(title, &members, &visible, &mut render));
            for i in members {
                emitted[i] = true;
            }
        }

        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, commit) in visible.iter().enumerate() {
            if emitted[i] {
                continue;
            }
            let key = self
                .config
                .header_text_for(&commit.scope)
                .or_else(|| self.config.header_text_for(&commit.commit_type));
            if let Some(key) = key {
                groups.entry(key).or_default().push(i);
            }
        }
        for (title, members) in groups {
            sections.push(self.grouped_section(title, &members, &visible, &mut render));
            for i in members {
                emitted[i] = true;
            }
        }

        let rest: Vec<usize> = (0..visible.len()).filter(|&i| !emitted[i]).collect();
        if !rest.is_empty() {
            let mut section = Section::new(&self.config.other_change);
            section.entries = rest.iter().map(|&i| render.entry(visible[i])).collect();
            sections.push(section);
        }

        debug!(
            sections = sections.len(),
            skipped = commits.len() - visible.len(),
            "changelog formatted"
        );
        ChangeLogDocument {
            header: self.config.header.clone(),
            sections,
            footer: self.config.footer.clone(),
            warnings: render.warnings,
        }
    }

    /// Entries whose scope is itself a recognized key come first, then the rest;
    /// both keep input order.
    fn grouped_section(
        &self,
        title: &str,
        members: &[usize],
        visible: &[&Commit],
        render: &mut EntryRenderer<'_>,
    ) -> Section {
        let (scoped, plain): (Vec<usize>, Vec<usize>) = members
            .iter()
            .partition(|&&i| self.config.header_text_for(&visible[i].scope).is_some());

        let mut section = Section::new(title);
        section.entries = scoped
            .iter()
            .chain(plain.iter())
            .map(|&i| render.entry(visible[i]))
            .collect();
        section
    }
}

struct EntryRenderer<'a> {
    link_base: Option<&'a str>,
    warnings: Vec<BoundaryWarning>,
}

impl EntryRenderer<'_> {
    /// `- [<short>](<base>/commit/<long>) <scope>: <header>`
    fn entry(&mut self, commit: &Commit) -> String {
        let mut line = String::from("- ");

        if let Some(base) = self.link_base {
            let (short, long) = match hash_forms(&commit.hash) {
                Ok(forms) => forms,
                Err(err) => {
                    warn!(hash = %commit.hash, "{}; using the full hash", err);
                    let warning = BoundaryWarning::MalformedCommit {
                        hash: commit.hash.clone(),
                    };
                    if !self.warnings.contains(&warning) {
                        self.warnings.push(warning);
                    }
                    (commit.hash.as_str(), commit.hash.as_str())
                }
            };
            line.push_str(&format!("[{}]({}/commit/{}) ", short, base, long));
        }

        if !commit.scope.is_empty() {
            line.push_str(&commit.scope);
            line.push_str(SCOPE_SEPARATOR);
        }
        line.push_str(&commit.header);
        line
    }
}

/// Short (8 character) and long (at most 40 character) forms of a hash
pub fn hash_forms(hash: &str) -> Result<(&str, &str)> {
    if hash.chars().count() < SHORT_HASH_LEN {
        return Err(ReleaseError::MalformedCommit {
            hash: hash.to_string(),
        });
    }
    Ok((prefix(hash, SHORT_HASH_LEN), prefix(hash, LONG_HASH_LEN)))
}

fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

    #[test]
    fn test_hash_forms() {
        assert_eq!(hash_forms(HASH).unwrap(), ("a1b2c3d4", HASH));
    }

    #[test]
    fn test_hash_forms_truncates_long_hash() {
        let long = format!("{}ffff", HASH);
        assert_eq!(hash_forms(&long).unwrap().1, HASH);
    }

    #[test]
    fn test_hash_forms_exactly_eight() {
        assert_eq!(hash_forms("abcdef12").unwrap(), ("abcdef12", "abcdef12"));
    }

    #[test]
    fn test_hash_forms_too_short() {
        let err = hash_forms("abc12").unwrap_err();
        assert!(matches!(err, ReleaseError::MalformedCommit { ref hash } if hash == "abc12"));
    }

    #[test]
    fn test_entry_with_scope_without_link() {
        let mut render = EntryRenderer {
            link_base: None,
            warnings: Vec::new(),
        };
        let commit = Commit::new(HASH, "fix", "parser", "handle edge case", false);
        assert_eq!(render.entry(&commit), "- parser: handle edge case");
    }

    #[test]
    fn test_entry_with_link() {
        let mut render = EntryRenderer {
            link_base: Some("https://www.github.com/owner/repo"),
            warnings: Vec::new(),
        };
        let commit = Commit::new(HASH, "feat", "", "add X", false);
        assert_eq!(
            render.entry(&commit),
            format!(
                "- [a1b2c3d4](https://www.github.com/owner/repo/commit/{}) add X",
                HASH
            )
        );
    }

    #[test]
    fn test_release_commits_only() {
        let formatter = ChangelogFormatter::new(ChangelogConfig::default());
        let commits = vec![Commit::new(HASH, "release", "", "1.0.0", false)];
        let doc = formatter.format(&commits, None);
        assert!(doc.sections.is_empty());
    }
}
