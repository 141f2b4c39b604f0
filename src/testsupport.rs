//! Test fixtures: scratch directories and a scripted command runner.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::command::{CommandRunner, ExecOutput};
use crate::error::CommandError;

/// Scratch directory removed on drop.
#[derive(Debug)]
pub struct TestTempDir {
    dir: TempDir,
}

impl TestTempDir {
    pub fn new(prefix: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("buildinfo-{prefix}-"))
            .tempdir()
            .expect("create fixture directory");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn child(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `content` under the fixture, creating parents.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        fs::create_dir_all(path.parent().unwrap_or(self.dir.path()))
            .expect("create fixture parents");
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.child(relative);
        fs::create_dir_all(&path).expect("create fixture subdirectory");
        path
    }
}

/// Scripted [`CommandRunner`]: answers from a table keyed by the full command
/// line and records every invocation.
///
/// Unscripted command lines fail with `exit status 127`.
#[derive(Debug, Default)]
pub struct FakeRunner {
    executables: BTreeMap<String, PathBuf>,
    responses: BTreeMap<String, ExecOutput>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` resolvable to `/usr/bin/<name>`.
    pub fn with_executable(mut self, name: &str) -> Self {
        self.executables
            .insert(name.to_string(), PathBuf::from("/usr/bin").join(name));
        self
    }

    /// Script a successful command with the given stdout.
    pub fn with_stdout(self, command_line: &str, stdout: &str) -> Self {
        self.with_output(command_line, 0, stdout, "")
    }

    /// Script a failing command with the given stderr.
    pub fn with_stderr(self, command_line: &str, stderr: &str) -> Self {
        self.with_output(command_line, 128, "", stderr)
    }

    pub fn with_output(
        mut self,
        command_line: &str,
        exit_code: i32,
        stdout: &str,
        stderr: &str,
    ) -> Self {
        self.responses.insert(
            command_line.to_string(),
            ExecOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Command lines executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn execute(&self, program: &str, args: &[String]) -> Result<ExecOutput, CommandError> {
        let line = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());
        Ok(self.responses.get(&line).cloned().unwrap_or(ExecOutput {
            exit_code: 127,
            stdout: String::new(),
            stderr: String::new(),
        }))
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        if let Some(path) = self.executables.get(name) {
            return Some(path.clone());
        }
        self.executables
            .values()
            .find(|path| path.as_os_str() == name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.mkdir("empty").is_dir());
    }

    #[test]
    fn temp_dir_fixture_is_removed_on_drop() {
        let fixture = TestTempDir::new("dropped");
        let root = fixture.path().to_path_buf();
        fixture.write_text("VERSION", "1.0.0");
        drop(fixture);
        assert!(!root.exists());
    }

    #[test]
    fn fake_runner_answers_scripted_lines_and_records_calls() {
        let runner = FakeRunner::new()
            .with_executable("git")
            .with_stdout("/usr/bin/git version", "git version 2.45.0");
        assert_eq!(
            runner.find_executable("git"),
            Some(PathBuf::from("/usr/bin/git"))
        );
        assert_eq!(
            runner.find_executable("/usr/bin/git"),
            Some(PathBuf::from("/usr/bin/git"))
        );
        assert_eq!(runner.find_executable("rpmspec"), None);
        assert_eq!(
            runner.run("/usr/bin/git", &["version".into()]).unwrap(),
            "git version 2.45.0"
        );
        assert_eq!(
            runner.run("/usr/bin/git", &["status".into()]).unwrap_err().to_string(),
            "exit status 127"
        );
        assert_eq!(
            runner.calls(),
            vec!["/usr/bin/git version", "/usr/bin/git status"]
        );
    }
}
