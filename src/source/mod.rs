//! Version and environment source selection.
//!
//! Version sources form a closed set ([`VersionSource`]). Resolution probes
//! them strictly in order against a directory and binds the first one that
//! applies:
//!
//! 1. Mock, only for the reserved [`MOCK_DIRS`] sentinels.
//! 2. File (`VERSION`, `VERSION.txt`).
//! 3. RPM spec (`*.spec` + `rpmspec`).
//! 4. Git (`git rev-parse --show-toplevel`).
//!
//! A probe answering [`SourceError::NotApplicable`] moves on to the next
//! candidate; any other error aborts resolution unchanged.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::command::CommandRunner;
use crate::error::SourceError;
use crate::version_info::VersionInfo;

pub mod file;
pub mod git;
pub mod mock;
pub mod os;
pub mod rpmspec;

pub use file::FileSource;
pub use git::GitSource;
pub use mock::MockSource;
pub use os::OsSource;
pub use rpmspec::RpmSpecSource;

/// Directory values that select the mock source without probing.
pub const MOCK_DIRS: [&str; 2] = ["/dev/mock", r"M:\\ock"];

/// Environment variable carrying the reproducible build timestamp.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

const PROBE_ORDER: [SourceKind; 3] = [SourceKind::File, SourceKind::RpmSpec, SourceKind::Git];

/// Names the variants of [`VersionSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Git,
    RpmSpec,
    Mock,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Git => "git",
            Self::RpmSpec => "rpmspec",
            Self::Mock => "mock",
        })
    }
}

/// A version source bound to its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    File(FileSource),
    Git(GitSource),
    RpmSpec(RpmSpecSource),
    Mock(MockSource),
}

impl VersionSource {
    /// Probe `dir` for one specific kind of source, using system executables.
    pub fn probe(
        kind: SourceKind,
        dir: &Path,
        runner: &dyn CommandRunner,
    ) -> Result<Self, SourceError> {
        Ok(match kind {
            SourceKind::File => FileSource::probe(dir)?.into(),
            SourceKind::Git => GitSource::probe_system(dir, runner)?.into(),
            SourceKind::RpmSpec => RpmSpecSource::probe_system(dir, runner)?.into(),
            SourceKind::Mock => MockSource::random().into(),
        })
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::File(_) => SourceKind::File,
            Self::Git(_) => SourceKind::Git,
            Self::RpmSpec(_) => SourceKind::RpmSpec,
            Self::Mock(_) => SourceKind::Mock,
        }
    }

    pub fn parse_version_info(&self, runner: &dyn CommandRunner) -> Result<VersionInfo, SourceError> {
        match self {
            Self::File(source) => source.parse_version_info(),
            Self::Git(source) => source.parse_version_info(runner),
            Self::RpmSpec(source) => source.parse_version_info(runner),
            Self::Mock(source) => source.parse_version_info(),
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(source) => write!(f, "file{source}"),
            Self::Git(source) => write!(f, "git{source}"),
            Self::RpmSpec(source) => write!(f, "rpmspec{source}"),
            Self::Mock(source) => write!(f, "mock{source}"),
        }
    }
}

impl From<FileSource> for VersionSource {
    fn from(source: FileSource) -> Self {
        Self::File(source)
    }
}

impl From<GitSource> for VersionSource {
    fn from(source: GitSource) -> Self {
        Self::Git(source)
    }
}

impl From<RpmSpecSource> for VersionSource {
    fn from(source: RpmSpecSource) -> Self {
        Self::RpmSpec(source)
    }
}

impl From<MockSource> for VersionSource {
    fn from(source: MockSource) -> Self {
        Self::Mock(source)
    }
}

/// True for the reserved directory values that select the mock source.
pub fn is_mock_dir(dir: &Path) -> bool {
    MOCK_DIRS.iter().any(|mock| dir.as_os_str() == *mock)
}

/// Make `dir` absolute against the working directory; empty means `.`.
pub fn absolute_dir(dir: &Path) -> Result<PathBuf, SourceError> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    Ok(std::path::absolute(dir)?)
}

/// Detect the version source that applies to `dir`.
pub fn resolve_version_source(
    dir: &Path,
    runner: &dyn CommandRunner,
) -> Result<VersionSource, SourceError> {
    if is_mock_dir(dir) {
        tracing::debug!(dir = %dir.display(), "mock directory requested");
        return Ok(MockSource::random().into());
    }

    let base = absolute_dir(dir)?;
    for kind in PROBE_ORDER {
        match VersionSource::probe(kind, &base, runner) {
            Ok(source) => {
                tracing::debug!(%kind, dir = %base.display(), "version source detected");
                return Ok(source);
            }
            Err(err) if err.is_not_applicable() => {
                tracing::debug!(%kind, dir = %base.display(), "version source not applicable");
            }
            Err(err) => return Err(err),
        }
    }

    Err(SourceError::Undetected(base))
}

/// Select the environment source from `SOURCE_DATE_EPOCH`.
pub fn resolve_environment_source() -> Result<OsSource, SourceError> {
    resolve_environment_source_with(|name| env::var(name).ok())
}

/// [`resolve_environment_source`] with an injected environment lookup.
///
/// Unset or empty selects live mode; otherwise the value must be an integer.
pub fn resolve_environment_source_with<FEnv>(env_lookup: FEnv) -> Result<OsSource, SourceError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    let raw = env_lookup(SOURCE_DATE_EPOCH).unwrap_or_default();
    if raw.is_empty() {
        return Ok(OsSource::live());
    }

    let timestamp = raw
        .parse::<i64>()
        .map_err(|e| SourceError::InvalidSourceDateEpoch {
            reason: e.to_string(),
            value: raw.clone(),
        })?;
    Ok(OsSource::new(timestamp))
}
