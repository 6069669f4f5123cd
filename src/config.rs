use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::domain::VersionBump;
use crate::error::Result;

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "github-release.toml";

/// Represents the complete configuration for github-release.
///
/// Contains changelog display strings, versioning patterns, release repository
/// settings and the GitHub Packages repositories used to resolve dependencies.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub repositories: RepositoriesConfig,

    /// Build properties, consulted by credential chains (e.g. `GPR_USER`)
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

fn default_header() -> String {
    "## What's Changed".to_string()
}

fn default_breaking_change() -> String {
    "### Breaking Changes 🛠".to_string()
}

fn default_other_change() -> String {
    "### Other Changes 💡".to_string()
}

/// Returns the default section titles keyed by commit type or scope.
fn default_header_texts() -> BTreeMap<String, String> {
    [
        ("feat", "### New Features 🎉"),
        ("fix", "### Bug Fixes 🐞"),
        ("refactor", "### Refactoring 🔨"),
        ("chore", "### Chores 🔧"),
        ("docs", "### Documentation 📖"),
        ("ci", "### Continuous Integration 🔄"),
        ("build", "### Build 📦"),
        ("test", "### Tests ✅"),
        ("deps", "### Dependency Updates 🚀"),
    ]
    .into_iter()
    .map(|(key, text)| (key.to_string(), text.to_string()))
    .collect()
}

/// Display strings used when rendering release notes.
///
/// `header_texts` maps a commit type or scope to the title of the section
/// that groups it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_breaking_change")]
    pub breaking_change: String,

    #[serde(default = "default_other_change")]
    pub other_change: String,

    #[serde(default)]
    pub footer: String,

    #[serde(default = "default_header_texts")]
    pub header_texts: BTreeMap<String, String>,
}

impl ChangelogConfig {
    /// Section title recognized for a scope or type, if any
    pub fn header_text_for(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.header_texts.get(key).map(String::as_str)
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            header: default_header(),
            breaking_change: default_breaking_change(),
            other_change: default_other_change(),
            footer: String::new(),
            header_texts: default_header_texts(),
        }
    }
}

fn default_patch_pattern() -> String {
    r"\A(fix|chore|docs|refactor|ci|build|test|deps)(?:\([^()]+\))?:".to_string()
}

fn default_minor_pattern() -> String {
    r"\Afeat(?:\([^()]+\))?!?:".to_string()
}

fn default_initial_version() -> String {
    "0.0.0".to_string()
}

fn default_bump() -> VersionBump {
    VersionBump::Patch
}

/// Patterns and defaults driving the computed (untagged) version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default = "default_patch_pattern")]
    pub patch_pattern: String,

    #[serde(default = "default_minor_pattern")]
    pub minor_pattern: String,

    /// Version assumed when no version tag exists yet
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    /// Bump applied when commits exist but none matches a pattern
    #[serde(default = "default_bump")]
    pub default_bump: VersionBump,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            patch_pattern: default_patch_pattern(),
            minor_pattern: default_minor_pattern(),
            initial_version: default_initial_version(),
            default_bump: default_bump(),
        }
    }
}

/// Release publishing settings for the current project.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct GitHubConfig {
    /// `owner/name` slug of the GitHub repository
    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub project_description: Option<String>,

    #[serde(default)]
    pub developer: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub license_url: Option<String>,

    /// The project is itself a Gradle plugin; its publication is `pluginMaven`
    #[serde(default)]
    pub gradle_plugin: bool,
}

/// GitHub Packages repositories consumed as dependency sources.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RepositoriesConfig {
    #[serde(default)]
    pub default_user: Option<String>,

    #[serde(default)]
    pub default_token: Option<String>,

    #[serde(default)]
    pub maven: Vec<MavenRepositoryConfig>,
}

/// One `[[repositories.maven]]` entry.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MavenRepositoryConfig {
    /// `owner/name` slug, e.g. "octocat/hello-world"
    pub repository: String,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub token: Option<String>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `github-release.toml` in current directory
/// 3. `github-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
