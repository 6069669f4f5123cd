use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use github_release::cli::{run_release_workflow, WorkflowResult};
use github_release::config::{self, Config};
use github_release::credentials::{ProjectContext, SystemEnvironment};
use github_release::git::{Git2Repository, GitCli, Repository};
use github_release::{publishing, ui};

#[derive(Parser)]
#[command(
    name = "github-release",
    version,
    about = "Resolve release versions and changelogs from git history"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, default_value = ".", help = "Repository to read")]
    path: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = Backend::Git2, help = "How git is read")]
    backend: Backend,

    #[arg(long, global = true, help = "GitHub repository as owner/name")]
    repository: Option<String>,

    #[arg(short, long, global = true, help = "Log debug output to stderr, overriding RUST_LOG")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved release version
    Version,
    /// Print the changelog for the release
    Changelog {
        #[arg(short, long, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Print the Maven publication as TOML
    Publication {
        #[arg(short, long, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Show the publishing and dependency repositories (tokens are masked)
    Repositories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// libgit2
    Git2,
    /// The `git` executable
    Cli,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, default warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    if let Some(repository) = args.repository {
        config.github.repository = Some(repository);
    }

    match args.command {
        Command::Version => {
            let result = resolve_release(&config, args.backend, &args.path)?;
            ui::display_version_summary(
                &result.version,
                result.previous_tag.as_deref(),
                result.commit_count,
            );
            println!("{}", result.version);
        }
        Command::Changelog { output } => {
            let result = resolve_release(&config, args.backend, &args.path)?;
            emit(&result.changelog.to_string(), output.as_deref())?;
        }
        Command::Publication { output } => {
            let result = resolve_release(&config, args.backend, &args.path)?;
            let text = publication(&config, result).to_toml()?;
            emit(&text, output.as_deref())?;
        }
        Command::Repositories => list_repositories(&config)?,
    }

    Ok(())
}

fn resolve_release(config: &Config, backend: Backend, path: &Path) -> Result<WorkflowResult> {
    ui::display_status(&format!("Reading history at {}", path.display()));
    let repo = open_repository(backend, path)?;
    let result = run_release_workflow(repo.as_ref(), config, &SystemEnvironment)
        .context("Failed to resolve the release")?;
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    Ok(result)
}

fn open_repository(backend: Backend, path: &Path) -> Result<Box<dyn Repository>> {
    let repo: Box<dyn Repository> = match backend {
        Backend::Git2 => Box::new(
            Git2Repository::open(path)
                .with_context(|| format!("Git repository error at {}", path.display()))?,
        ),
        Backend::Cli => Box::new(GitCli::new(path)),
    };
    Ok(repo)
}

fn publication(config: &Config, result: WorkflowResult) -> publishing::Publication {
    let env = SystemEnvironment;
    let ctx = ProjectContext::new(&config.properties, &env);
    publishing::publication(
        config,
        &ctx,
        result.repository.as_ref(),
        &result.version,
        result.changelog.to_string(),
    )
}

fn list_repositories(config: &Config) -> Result<()> {
    let env = SystemEnvironment;
    let ctx = ProjectContext::new(&config.properties, &env);

    let slug = github_release::credentials::release_repository(config)
        .resolve_optional(&ctx)
        .map(|s| publishing::RepositorySlug::parse(&s))
        .transpose()?;
    let release = publishing::release_repository(slug.as_ref(), config, &ctx);
    let dependencies = publishing::dependency_repositories(config, &ctx)
        .context("Failed to resolve dependency repositories")?;

    print!("{}", ui::format_repositories(&release, &dependencies));
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ui::display_success(&format!("Wrote {}", path.display()));
        }
        None => print!("{}", text),
    }
    Ok(())
}
