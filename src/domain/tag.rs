use regex::Regex;
use std::sync::OnceLock;

fn version_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("static version tag pattern"))
}

/// A git tag whose name is a strict `MAJOR.MINOR.PATCH` version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub version: semver::Version,
}

impl VersionTag {
    /// Returns `None` unless the whole tag name is ASCII `MAJOR.MINOR.PATCH`
    pub fn parse(name: &str) -> Option<Self> {
        if !Self::matches(name) {
            return None;
        }
        // The pattern can still overflow u64 components
        let version = semver::Version::parse(name).ok()?;
        Some(VersionTag {
            name: name.to_string(),
            version,
        })
    }

    /// Validate if a tag name is a version tag
    pub fn matches(name: &str) -> bool {
        version_tag_regex().is_match(name)
    }
}
