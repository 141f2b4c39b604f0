//! Combined version and environment record handed to renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::environment_info::EnvironmentInfo;
use crate::toolchain;
use crate::version_info::VersionInfo;

/// Version and environment information of one build.
///
/// Serializes to a single flat JSON object:
/// `{"version":…,"revision":…,"branch":…,"user":…,"host":…,"date":…}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(flatten)]
    pub version_info: VersionInfo,
    #[serde(flatten)]
    pub environment_info: EnvironmentInfo,
}

impl BuildInfo {
    pub fn new(version_info: VersionInfo, environment_info: EnvironmentInfo) -> Self {
        Self {
            version_info,
            environment_info,
        }
    }

    /// Parse JSON produced by [`BuildInfo::to_json`].
    ///
    /// Empty (or whitespace-only) input yields a defaulted record. Fields
    /// missing from the object keep their defaults.
    pub fn parse(data: &[u8]) -> Result<Self, serde_json::Error> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(data)
    }

    /// Like [`BuildInfo::parse`], but any error yields a defaulted record.
    pub fn parse_or_default(data: &[u8]) -> Self {
        Self::parse(data).unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn version(&self) -> &str {
        &self.version_info.version
    }

    pub fn revision(&self) -> &str {
        &self.version_info.revision
    }

    pub fn branch(&self) -> &str {
        &self.version_info.branch
    }

    pub fn user(&self) -> &str {
        &self.environment_info.user
    }

    pub fn host(&self) -> &str {
        &self.environment_info.host
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.environment_info.date
    }

    /// Multi-line human-readable report for `program`.
    pub fn print(&self, program: &str) -> String {
        format!(
            "{program}, version {} (branch: {}, revision: {})\n  \
             build user:       {}\n  \
             build host:       {}\n  \
             build date:       {}\n  \
             rust version:     {}\n  \
             platform:         {}",
            self.version(),
            self.branch(),
            self.version_info.short_revision(),
            self.user(),
            self.host(),
            self.date().to_rfc3339(),
            toolchain::RUSTC_VERSION,
            toolchain::platform(),
        )
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.version_info, self.environment_info)
    }
}
