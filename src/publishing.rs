//! Maven publication model for GitHub Packages.
//!
//! Nothing here talks to a registry: these are the descriptors a build tool
//! needs to publish the resolved version with its release notes.

use std::fmt;

use serde::Serialize;

use crate::config::Config;
use crate::credentials::{self, ProjectContext};
use crate::domain::ReleaseVersion;
use crate::error::{ReleaseError, Result};

pub const MAVEN_REGISTRY_BASE: &str = "https://maven.pkg.github.com";
pub const RELEASE_REPOSITORY_NAME: &str = "GitHubPackages";
pub const PUBLICATION_NAME: &str = "mavenJava";
pub const PLUGIN_PUBLICATION_NAME: &str = "pluginMaven";

/// A validated `owner/name` GitHub repository reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: String,
    name: String,
}

impl RepositorySlug {
    pub fn parse(slug: &str) -> Result<Self> {
        let invalid = || {
            ReleaseError::config(format!(
                "Invalid repository '{}': expected owner/name",
                slug
            ))
        };
        let (owner, name) = slug.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(RepositorySlug {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn maven_url(&self) -> String {
        format!("{}/{}", MAVEN_REGISTRY_BASE, self)
    }

    pub fn scm(&self) -> Scm {
        Scm {
            connection: format!("scm:git:git://github.com/{}.git", self),
            developer_connection: format!("scm:git:ssh://github.com:{}.git", self),
            url: format!("https://github.com/{}", self),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: Option<String>,
    /// Never serialized
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MavenRepository {
    pub name: String,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scm {
    pub connection: String,
    pub developer_connection: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub developers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<Scm>,
}

/// Resolved version and release notes registered into a Maven publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub name: String,
    pub version: String,
    pub changelog: String,
    pub pom: Pom,
    pub repository: MavenRepository,
}

impl Publication {
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Repository the release is published to.
///
/// The URL is only known with a slug; credentials are attached only when
/// configured, publishing tools fail later if they turn out to be required.
pub fn release_repository(
    slug: Option<&RepositorySlug>,
    config: &Config,
    ctx: &ProjectContext<'_>,
) -> MavenRepository {
    let credentials = Credentials {
        username: credentials::release_user(config).resolve_optional(ctx),
        password: credentials::release_token(config).resolve_optional(ctx),
    };
    MavenRepository {
        name: RELEASE_REPOSITORY_NAME.to_string(),
        url: slug.map(RepositorySlug::maven_url),
        credentials: (!credentials.is_empty()).then_some(credentials),
    }
}

/// GitHub Packages repositories used to resolve dependencies.
///
/// Each entry needs both a username and a token.
pub fn dependency_repositories(
    config: &Config,
    ctx: &ProjectContext<'_>,
) -> Result<Vec<MavenRepository>> {
    config
        .repositories
        .maven
        .iter()
        .map(|entry| {
            let slug = RepositorySlug::parse(&entry.repository)?;
            let username = credentials::package_registry_user(config, entry).resolve(ctx)?;
            let password = credentials::package_registry_token(config, entry).resolve(ctx)?;
            Ok(MavenRepository {
                name: format!(
                    "{}-{}-{}",
                    RELEASE_REPOSITORY_NAME,
                    slug.owner(),
                    slug.name()
                ),
                url: Some(slug.maven_url()),
                credentials: Some(Credentials {
                    username: Some(username),
                    password: Some(password),
                }),
            })
        })
        .collect()
}

/// Project metadata for the POM
pub fn pom(config: &Config, slug: Option<&RepositorySlug>) -> Pom {
    let github = &config.github;
    Pom {
        name: github.project_name.clone(),
        description: github.project_description.clone(),
        developers: github.developer.iter().cloned().collect(),
        license: github.license.as_ref().map(|name| License {
            name: name.clone(),
            url: github.license_url.clone(),
        }),
        scm: slug.map(RepositorySlug::scm),
    }
}

/// Assemble the publication for a resolved release
pub fn publication(
    config: &Config,
    ctx: &ProjectContext<'_>,
    slug: Option<&RepositorySlug>,
    version: &ReleaseVersion,
    changelog: String,
) -> Publication {
    let name = if config.github.gradle_plugin {
        PLUGIN_PUBLICATION_NAME
    } else {
        PUBLICATION_NAME
    };
    Publication {
        name: name.to_string(),
        version: version.to_string(),
        changelog,
        pom: pom(config, slug),
        repository: release_repository(slug, config, ctx),
    }
}
