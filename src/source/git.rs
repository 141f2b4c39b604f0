//! Version source backed by the `git` command line client.

use std::fmt;
use std::path::{Path, PathBuf};

use super::SourceKind;
use crate::command::CommandRunner;
use crate::error::{CommandError, SourceError};
use crate::version_info::VersionInfo;

/// Executable name looked up on `PATH` when no explicit git binary is given.
pub const SYSTEM_GIT: &str = "git";

// git's own diagnostic is the only signal that a directory is outside any
// repository; matched as a substring of stderr.
const NOT_A_REPOSITORY: &str = "not a git repository";
const TAG_PREFIX: char = 'v';

/// Queries branch, HEAD revision and latest tag of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    cmd: String,
    root: PathBuf,
}

impl GitSource {
    pub fn new(cmd: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            cmd: cmd.into(),
            root: root.into(),
        }
    }

    /// [`GitSource::probe`] using `git` from `PATH`.
    pub fn probe_system(dir: &Path, runner: &dyn CommandRunner) -> Result<Self, SourceError> {
        Self::probe(SYSTEM_GIT, dir, runner)
    }

    /// Bind to the repository containing `dir`, using the `cmd` executable.
    ///
    /// A missing executable or a directory outside any repository is not
    /// applicable. Every other failure is a hard error.
    pub fn probe(cmd: &str, dir: &Path, runner: &dyn CommandRunner) -> Result<Self, SourceError> {
        let not_applicable = || SourceError::NotApplicable {
            kind: SourceKind::Git,
            dir: dir.to_path_buf(),
        };

        let Some(exe) = runner.find_executable(cmd) else {
            tracing::debug!(cmd, "git executable not found");
            return Err(not_applicable());
        };
        let exe = exe.to_string_lossy().into_owned();

        match run_git(runner, &exe, dir, &["rev-parse", "--show-toplevel"]) {
            Ok(root) => Ok(Self::new(exe, root)),
            Err(CommandError::Stderr(text)) if text.contains(NOT_A_REPOSITORY) => {
                Err(not_applicable())
            }
            Err(e) => Err(SourceError::command(
                "unable to determine git repository root",
                e,
            )),
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn parse_version_info(&self, runner: &dyn CommandRunner) -> Result<VersionInfo, SourceError> {
        let mut info = VersionInfo::default();

        let branch = self
            .run(runner, &["rev-parse", "--abbrev-ref", "HEAD"])
            .map_err(|e| SourceError::command("unable to determine current git branch", e))?;
        if !branch.is_empty() {
            info.branch = branch;
        }

        let revision = self
            .run(runner, &["rev-parse", "HEAD"])
            .map_err(|e| SourceError::command("unable to determine git HEAD revision", e))?;
        if !revision.is_empty() {
            info.revision = revision;
        }

        // Untagged repositories keep the default version.
        match self.run(runner, &["describe", "--tags", "--abbrev=0"]) {
            Ok(tag) if !tag.is_empty() => {
                info.version = tag.strip_prefix(TAG_PREFIX).unwrap_or(tag.as_str()).to_string();
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "no git tag found"),
        }

        Ok(info)
    }

    fn run(&self, runner: &dyn CommandRunner, args: &[&str]) -> Result<String, CommandError> {
        run_git(runner, &self.cmd, &self.root, args)
    }
}

impl fmt::Display for GitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cmd={}, root={})", self.cmd, self.root.display())
    }
}

fn run_git(
    runner: &dyn CommandRunner,
    cmd: &str,
    cwd: &Path,
    args: &[&str],
) -> Result<String, CommandError> {
    let argv: Vec<String> = ["-C".to_string(), cwd.to_string_lossy().into_owned()]
        .into_iter()
        .chain(args.iter().map(|arg| arg.to_string()))
        .collect();
    runner.run(cmd, &argv)
}
