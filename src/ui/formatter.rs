//! Pure formatting functions for terminal output.
//!
//! stdout carries the resolved version, changelog or publication so it can be
//! piped; every message here goes to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseVersion;
use crate::publishing::MavenRepository;

const MASK: &str = "********";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Summarize how the version was obtained.
///
/// # Arguments
/// * `version` - The resolved version
/// * `previous_tag` - Latest version tag before HEAD, if any
/// * `commit_count` - Commits in the release range
pub fn display_version_summary(
    version: &ReleaseVersion,
    previous_tag: Option<&str>,
    commit_count: usize,
) {
    let origin = if version.is_tagged() {
        "tag at HEAD"
    } else {
        "computed from history"
    };
    eprintln!(
        "{} {} ({})",
        style("Version:").bold(),
        style(version).green().bold(),
        origin
    );
    match previous_tag {
        Some(tag) => eprintln!(
            "  {} commits since {}",
            commit_count,
            style(tag).yellow()
        ),
        None => eprintln!("  {} commits, no previous version tag", commit_count),
    }
}

/// Render configured repositories without revealing secrets.
///
/// Usernames are shown, tokens are always masked.
pub fn format_repositories(release: &MavenRepository, dependencies: &[MavenRepository]) -> String {
    let mut out = String::from("Release repository:\n");
    out.push_str(&format_repository(release));
    out.push_str("\nDependency repositories:\n");
    if dependencies.is_empty() {
        out.push_str("  (none)\n");
    }
    for repo in dependencies {
        out.push_str(&format_repository(repo));
    }
    out
}

fn format_repository(repo: &MavenRepository) -> String {
    let mut out = format!(
        "  {}\n    url: {}\n",
        repo.name,
        repo.url.as_deref().unwrap_or("(unknown repository)")
    );
    match &repo.credentials {
        Some(creds) => {
            out.push_str(&format!(
                "    user: {}\n    token: {}\n",
                creds.username.as_deref().unwrap_or("(unset)"),
                if creds.password.is_some() { MASK } else { "(unset)" }
            ));
        }
        None => out.push_str("    credentials: (none)\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publishing::Credentials;

    fn repo(name: &str, token: Option<&str>) -> MavenRepository {
        MavenRepository {
            name: name.to_string(),
            url: Some(format!("https://maven.pkg.github.com/owner/{}", name)),
            credentials: Some(Credentials {
                username: Some("actor".to_string()),
                password: token.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_format_repositories_masks_tokens() {
        let text = format_repositories(
            &repo("release", Some("ghp_secret")),
            &[repo("dep", Some("another_secret"))],
        );
        assert!(!text.contains("ghp_secret"));
        assert!(!text.contains("another_secret"));
        assert!(text.contains("user: actor"));
        assert!(text.contains(MASK));
    }

    #[test]
    fn test_format_repositories_without_credentials() {
        let release = MavenRepository {
            name: "GitHubPackages".to_string(),
            url: None,
            credentials: None,
        };
        let text = format_repositories(&release, &[]);
        assert!(text.contains("(unknown repository)"));
        assert!(text.contains("credentials: (none)"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stderr
        display_status("test status");
    }
}
