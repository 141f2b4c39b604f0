//! External process execution shared by the process-based version sources.
//!
//! Execution is synchronous and blocking: a hung child blocks the caller
//! until it exits. [`CommandRunner`] is the seam tests substitute.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::CommandError;

/// Captured result of one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code, `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Reduce captured streams to trimmed stdout or a meaningful error.
    ///
    /// Stderr only becomes the error when the process failed or when it
    /// succeeded without printing anything on stdout. A failure without any
    /// stderr text reports the exit status.
    pub fn into_result(self) -> Result<String, CommandError> {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        let success = self.exit_code == 0;

        if !stderr.is_empty() && (!success || stdout.is_empty()) {
            return Err(CommandError::Stderr(stderr.to_string()));
        }
        if !success {
            return Err(CommandError::Status(self.exit_code));
        }
        Ok(stdout.to_string())
    }
}

/// Process execution capability used by the version sources.
pub trait CommandRunner {
    /// Spawn `program` with `args` and wait for it to exit.
    fn execute(&self, program: &str, args: &[String]) -> Result<ExecOutput, CommandError>;

    /// Locate an executable by name (searching `PATH`) or by explicit path.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Run a command and return its trimmed stdout, see [`ExecOutput::into_result`].
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        self.execute(program, args)?.into_result()
    }
}

/// [`CommandRunner`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn execute(&self, program: &str, args: &[String]) -> Result<ExecOutput, CommandError> {
        tracing::debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(ExecOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        let path_var = env::var_os("PATH").unwrap_or_default();
        find_executable_in(name, env::split_paths(&path_var))
    }
}

/// Resolve `name` against `dirs`. Names containing a path separator are
/// checked as-is and never searched.
pub fn find_executable_in<I>(name: &str, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    if name.is_empty() {
        return None;
    }
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    dirs.into_iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| executable_names(name).map(move |file| dir.join(file)))
        .find(|path| is_executable(path))
}

#[cfg(windows)]
fn executable_names(name: &str) -> impl Iterator<Item = String> {
    [name.to_string(), format!("{name}.exe")].into_iter()
}

#[cfg(not(windows))]
fn executable_names(name: &str) -> impl Iterator<Item = String> {
    std::iter::once(name.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
