//! Decides the single authoritative version for the current commit.

use tracing::{debug, warn};

use crate::domain::{ReleaseVersion, VersionTag};

/// Picks between a version tag on HEAD and the computed fallback.
pub struct VersionResolver;

impl VersionResolver {
    /// Resolve the release version.
    ///
    /// A tag on HEAD named exactly `MAJOR.MINOR.PATCH` wins and is returned
    /// verbatim. When several such tags point at HEAD the highest version is
    /// chosen. Without one, `fallback` is returned unchanged.
    pub fn resolve<S: AsRef<str>>(tags_at_head: &[S], fallback: &str) -> ReleaseVersion {
        let candidates: Vec<&str> = tags_at_head
            .iter()
            .map(AsRef::as_ref)
            .filter(|tag| VersionTag::matches(tag))
            .collect();

        if candidates.len() > 1 {
            warn!(tags = ?candidates, "multiple version tags point at HEAD");
        }

        match Self::highest(&candidates) {
            Some(tag) => {
                debug!(tag, "HEAD carries a version tag");
                ReleaseVersion::Tagged(tag.to_string())
            }
            None => {
                debug!(fallback, "no version tag at HEAD, using computed version");
                ReleaseVersion::Computed(fallback.to_string())
            }
        }
    }

    /// Version tags among `tags`, in the order given
    pub fn version_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
        tags.iter()
            .map(AsRef::as_ref)
            .filter(|tag| VersionTag::matches(tag))
            .map(str::to_string)
            .collect()
    }

    fn highest<'a>(candidates: &[&'a str]) -> Option<&'a str> {
        // Tags like "01.2.3" match the pattern but are not valid semver; they
        // sort below every parseable tag and among themselves by name.
        candidates.iter().copied().max_by(|a, b| {
            let va = VersionTag::parse(a).map(|t| t.version);
            let vb = VersionTag::parse(b).map(|t| t.version);
            va.cmp(&vb).then_with(|| a.cmp(b))
        })
    }
}
