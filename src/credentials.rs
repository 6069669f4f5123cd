//! Credential resolution for GitHub Packages.
//!
//! Every lookup receives a [`ProjectContext`] explicitly; nothing is read
//! from process-wide state except through the context's [`Environment`].
//! A [`CredentialChain`] tries its sources in order and reports the whole
//! chain when all of them come up empty.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{Config, MavenRepositoryConfig};
use crate::error::{ReleaseError, Result};

/// Source of environment variables
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Everything a credential lookup may consult
pub struct ProjectContext<'a> {
    pub properties: &'a HashMap<String, String>,
    pub env: &'a dyn Environment,
}

impl<'a> ProjectContext<'a> {
    pub fn new(properties: &'a HashMap<String, String>, env: &'a dyn Environment) -> Self {
        ProjectContext { properties, env }
    }
}

/// One place a credential may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// A value already known, e.g. from the configuration file
    Value { label: String, value: Option<String> },
    /// A build property by name
    Property(String),
    /// An environment variable by name
    Env(String),
}

impl CredentialSource {
    fn lookup(&self, ctx: &ProjectContext<'_>) -> Option<String> {
        let value = match self {
            CredentialSource::Value { value, .. } => value.clone(),
            CredentialSource::Property(name) => ctx.properties.get(name).cloned(),
            CredentialSource::Env(name) => ctx.env.var(name),
        };
        // Unset and empty are the same thing for credentials
        value.filter(|v| !v.is_empty())
    }

    fn describe(&self) -> String {
        match self {
            CredentialSource::Value { label, .. } => label.clone(),
            CredentialSource::Property(name) => format!("property {}", name),
            CredentialSource::Env(name) => format!("env {}", name),
        }
    }
}

/// Ordered list of credential sources; the first present value wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialChain {
    name: String,
    sources: Vec<CredentialSource>,
}

impl CredentialChain {
    pub fn new(name: impl Into<String>) -> Self {
        CredentialChain {
            name: name.into(),
            sources: Vec::new(),
        }
    }

    pub fn value(mut self, label: impl Into<String>, value: Option<String>) -> Self {
        self.sources.push(CredentialSource::Value {
            label: label.into(),
            value,
        });
        self
    }

    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.sources.push(CredentialSource::Property(name.into()));
        self
    }

    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.sources.push(CredentialSource::Env(name.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &[CredentialSource] {
        &self.sources
    }

    /// First non-empty value, or `None` when every source is empty
    pub fn resolve_optional(&self, ctx: &ProjectContext<'_>) -> Option<String> {
        self.sources.iter().find_map(|source| {
            let value = source.lookup(ctx)?;
            debug!(chain = %self.name, source = %source.describe(), "credential resolved");
            Some(value)
        })
    }

    /// First non-empty value, or `CredentialMissing` naming the exhausted chain
    pub fn resolve(&self, ctx: &ProjectContext<'_>) -> Result<String> {
        self.resolve_optional(ctx)
            .ok_or_else(|| ReleaseError::CredentialMissing {
                chain: self.name.clone(),
                sources: self.sources.iter().map(CredentialSource::describe).collect(),
            })
    }
}

/// Username for a GitHub Packages dependency repository
pub fn package_registry_user(config: &Config, entry: &MavenRepositoryConfig) -> CredentialChain {
    CredentialChain::new("GitHub Package Registry username")
        .value("repository user", entry.user.clone())
        .value("default user", config.repositories.default_user.clone())
        .property("GPR_USER")
        .env("GITHUB_ACTOR")
}

/// Token for a GitHub Packages dependency repository
pub fn package_registry_token(config: &Config, entry: &MavenRepositoryConfig) -> CredentialChain {
    CredentialChain::new("GitHub Package Registry token")
        .value("repository token", entry.token.clone())
        .value("default token", config.repositories.default_token.clone())
        .property("GPR_KEY")
        .env("GPR_KEY")
}

/// `owner/name` slug of the repository being released
pub fn release_repository(config: &Config) -> CredentialChain {
    CredentialChain::new("GitHub Release repository")
        .value("github.repository", config.github.repository.clone())
        .env("GITHUB_REPOSITORY")
}

/// Username used when publishing the release
pub fn release_user(config: &Config) -> CredentialChain {
    CredentialChain::new("GitHub Release user")
        .value("github.user", config.github.user.clone())
        .env("GITHUB_ACTOR")
}

/// Token used when publishing the release
pub fn release_token(config: &Config) -> CredentialChain {
    CredentialChain::new("GitHub Release token")
        .value("github.token", config.github.token.clone())
        .env("GITHUB_TOKEN")
}
