//! Fixture version source for tests and demos.

use std::fmt;

use crate::error::SourceError;
use crate::version_info::VersionInfo;

/// Returns a preset [`VersionInfo`], or a fresh defaulted one on every call
/// when nothing was preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockSource {
    info: Option<VersionInfo>,
}

impl MockSource {
    pub fn new(info: VersionInfo) -> Self {
        Self { info: Some(info) }
    }

    /// Mock without stable data.
    pub fn random() -> Self {
        Self { info: None }
    }

    /// Preset only the non-empty values; the rest keep their defaults.
    pub fn from_values(version: &str, revision: &str, branch: &str) -> Self {
        let mut info = VersionInfo::default();
        if !version.is_empty() {
            info.version = version.to_string();
        }
        if !revision.is_empty() {
            info.revision = revision.to_string();
        }
        if !branch.is_empty() {
            info.branch = branch.to_string();
        }
        Self::new(info)
    }

    pub fn info(&self) -> Option<&VersionInfo> {
        self.info.as_ref()
    }

    pub fn parse_version_info(&self) -> Result<VersionInfo, SourceError> {
        Ok(self.info.clone().unwrap_or_default())
    }
}

impl fmt::Display for MockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.info {
            Some(info) => write!(f, "(info={info})"),
            None => write!(f, "(info=random)"),
        }
    }
}
