//! Version source rendering an RPM `.spec` file through `rpmspec`.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SourceKind;
use crate::command::CommandRunner;
use crate::error::{CommandError, SourceError};
use crate::version_info::VersionInfo;

/// Executable name looked up on `PATH`.
pub const SYSTEM_RPMSPEC: &str = "rpmspec";

const VERSION_MACRO: &str = "%{version}";
const REVISION_MACRO: &str = "%{release}";
const SPEC_SUFFIX: &str = ".spec";

/// Takes version from `%{version}` and revision from `%{release}`. The
/// branch is never populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmSpecSource {
    cmd: String,
    file: PathBuf,
}

impl RpmSpecSource {
    pub fn new(cmd: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            cmd: cmd.into(),
            file: file.into(),
        }
    }

    /// [`RpmSpecSource::probe`] using `rpmspec` from `PATH`.
    pub fn probe_system(dir: &Path, runner: &dyn CommandRunner) -> Result<Self, SourceError> {
        Self::probe(SYSTEM_RPMSPEC, dir, runner)
    }

    /// Bind to the first `*.spec` file (by name) in `dir`.
    ///
    /// A missing executable or a directory without spec files is not
    /// applicable.
    pub fn probe(cmd: &str, dir: &Path, runner: &dyn CommandRunner) -> Result<Self, SourceError> {
        let not_applicable = || SourceError::NotApplicable {
            kind: SourceKind::RpmSpec,
            dir: dir.to_path_buf(),
        };

        let Some(exe) = runner.find_executable(cmd) else {
            tracing::debug!(cmd, "rpmspec executable not found");
            return Err(not_applicable());
        };

        match find_spec_file(dir)? {
            Some(file) => Ok(Self::new(exe.to_string_lossy(), file)),
            None => Err(not_applicable()),
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn parse_version_info(&self, runner: &dyn CommandRunner) -> Result<VersionInfo, SourceError> {
        let mut info = VersionInfo::default();

        let version = self
            .query(runner, VERSION_MACRO)
            .map_err(|e| SourceError::command("unable to query rpm spec version", e))?;
        if !version.is_empty() {
            info.version = version;
        }

        let revision = self
            .query(runner, REVISION_MACRO)
            .map_err(|e| SourceError::command("unable to query rpm spec release", e))?;
        if !revision.is_empty() {
            info.revision = revision;
        }

        Ok(info)
    }

    fn query(&self, runner: &dyn CommandRunner, format: &str) -> Result<String, CommandError> {
        let args = [
            "--query".to_string(),
            "--queryformat".to_string(),
            format.to_string(),
            self.file.to_string_lossy().into_owned(),
        ];
        runner.run(&self.cmd, &args)
    }
}

impl fmt::Display for RpmSpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cmd={}, spec={})", self.cmd, self.file.display())
    }
}

fn find_spec_file(dir: &Path) -> Result<Option<PathBuf>, SourceError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut specs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(SPEC_SUFFIX) {
            specs.push(entry.path());
        }
    }
    specs.sort();
    Ok(specs.into_iter().next())
}
