//! Version source reading a `VERSION` file in the project root.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SourceKind;
use crate::error::SourceError;
use crate::version_info::VersionInfo;

/// Primary version file name.
pub const FILENAME: &str = "VERSION";
/// Fallback version file name, checked after [`FILENAME`].
pub const ALT_FILENAME: &str = "VERSION.txt";

const VERSION_CONCAT: char = '-';

/// Reads `version[-revision[-branch]]` from a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Look for [`FILENAME`], then [`ALT_FILENAME`] inside `dir`.
    pub fn probe(dir: &Path) -> Result<Self, SourceError> {
        for name in [FILENAME, ALT_FILENAME] {
            let path = dir.join(name);
            match fs::metadata(&path) {
                Ok(_) => return Ok(Self::new(path)),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(SourceError::NotApplicable {
            kind: SourceKind::File,
            dir: dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_version_info(&self) -> Result<VersionInfo, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        parse_version_str(&content)
    }
}

impl fmt::Display for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(file={})", self.path.display())
    }
}

/// Parse `version[-revision[-branch]]`, the inverse of
/// [`VersionInfo::version_revision`].
///
/// Only the first line of the trimmed input is considered. The version is
/// mandatory. Revision and branch may be absent, but a separator followed by
/// an empty segment is rejected.
pub fn parse_version_str(input: &str) -> Result<VersionInfo, SourceError> {
    let line = input.trim().lines().next().unwrap_or_default().trim();
    let mut parts = line.splitn(3, VERSION_CONCAT);
    let mut info = VersionInfo::default();

    match parts.next() {
        Some(version) if !version.is_empty() => info.version = version.to_string(),
        _ => return Err(SourceError::MalformedVersion),
    }

    if let Some(revision) = parts.next() {
        if revision.is_empty() {
            return Err(SourceError::MalformedRevision);
        }
        info.revision = revision.to_string();
    }

    if let Some(branch) = parts.next() {
        if branch.is_empty() {
            return Err(SourceError::MalformedBranch);
        }
        info.branch = branch.to_string();
    }

    Ok(info)
}
