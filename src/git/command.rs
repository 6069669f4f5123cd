use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use crate::error::{ReleaseError, Result};
use crate::git::CommitInfo;

const RECORD_SEPARATOR: char = '\u{1e}';
const UNIT_SEPARATOR: char = '\u{1f}';

/// Reads the repository by running the `git` executable
pub struct GitCli {
    workdir: PathBuf,
    program: String,
}

impl GitCli {
    /// Run `git` inside `workdir`
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        GitCli {
            workdir: workdir.as_ref().to_path_buf(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable, e.g. an absolute path to git
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run a git command and return its stdout.
    ///
    /// `Command::output` drains stdout and stderr completely before the exit
    /// status is collected, so large histories cannot block on a full pipe.
    #[instrument(skip(self), fields(workdir = %self.workdir.display()))]
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("{} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| ReleaseError::vcs(&command_line, None, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::vcs(
                command_line,
                output.status.code(),
                stderr.trim().to_string(),
            ));
        }

        debug!(bytes = output.stdout.len(), "git command succeeded");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl super::Repository for GitCli {
    fn head_hash(&self) -> Result<String> {
        Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
    }

    fn tags_at_head(&self) -> Result<Vec<String>> {
        let output = self.run(&["tag", "--points-at", "HEAD"])?;
        let mut tags: Vec<String> = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        tags.sort();
        Ok(tags)
    }

    fn tags_by_commit(&self) -> Result<HashMap<String, Vec<String>>> {
        // %(*objectname) is the peeled commit of annotated tags, empty otherwise
        let output = self.run(&[
            "for-each-ref",
            "--format=%(refname:short)%09%(objectname)%09%(*objectname)",
            "refs/tags",
        ])?;
        Ok(parse_tag_refs(&output))
    }

    fn walk_history(
        &self,
        hide: Option<&str>,
        visit: &mut dyn FnMut(CommitInfo) -> bool,
    ) -> Result<()> {
        let revisions = match hide {
            Some(hash) => format!("{}..HEAD", hash),
            None => "HEAD".to_string(),
        };
        let output = self.run(&["log", "--format=%x1e%H%x1f%B", &revisions])?;
        for info in parse_log(&output) {
            if !visit(info) {
                break;
            }
        }
        Ok(())
    }
}

fn parse_tag_refs(output: &str) -> HashMap<String, Vec<String>> {
    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    for line in output.lines() {
        let mut fields = line.split('\t');
        let (Some(name), Some(object)) = (fields.next(), fields.next()) else {
            continue;
        };
        let peeled = fields.next().filter(|p| !p.is_empty()).unwrap_or(object);
        if name.is_empty() || peeled.is_empty() {
            continue;
        }
        tags.entry(peeled.to_string())
            .or_default()
            .push(name.to_string());
    }
    tags
}

fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .split(RECORD_SEPARATOR)
        .filter_map(|record| {
            let (hash, message) = record.split_once(UNIT_SEPARATOR)?;
            let hash = hash.trim();
            if hash.is_empty() {
                return None;
            }
            Some(CommitInfo::new(hash, message.trim_end()))
        })
        .collect()
}
