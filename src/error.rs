use thiserror::Error;

/// Unified error type for github-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// A version control read failed. Always fatal: publishing an unversioned
    /// artifact is worse than not publishing at all.
    #[error("VCS unavailable: `{command}` failed{}: {message}", exit_code_suffix(.code))]
    VcsUnavailable {
        command: String,
        code: Option<i32>,
        message: String,
    },

    #[error("Malformed commit: hash '{hash}' is shorter than 8 characters")]
    MalformedCommit { hash: String },

    #[error("Credential missing: {chain} (tried {})", .sources.join(", "))]
    CredentialMissing { chain: String, sources: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot serialize publication: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

/// Convenience type alias for Results in github-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a VCS failure for `command`
    pub fn vcs(command: impl Into<String>, code: Option<i32>, msg: impl Into<String>) -> Self {
        ReleaseError::VcsUnavailable {
            command: command.into(),
            code,
            message: msg.into(),
        }
    }

    /// Wrap a libgit2 failure as the git command it stands in for
    pub fn from_git2(command: impl Into<String>, err: git2::Error) -> Self {
        ReleaseError::VcsUnavailable {
            command: command.into(),
            code: Some(err.raw_code()),
            message: err.message().to_string(),
        }
    }
}
