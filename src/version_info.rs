//! Project state as reported by a version control system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default value for [`VersionInfo::version`].
pub const DEFAULT_VERSION: &str = "0.0.0";
/// Default value for [`VersionInfo::revision`].
pub const DEFAULT_REVISION: &str = "HEAD";
/// Default value for [`VersionInfo::branch`].
pub const DEFAULT_BRANCH: &str = "trunk";

const VERSION_CONCAT: &str = "-";
const SHORT_REVISION_LEN: usize = 8;

/// Version, revision and branch of a project.
///
/// Fields missing from JSON input fall back to their defaults; empty fields
/// are omitted from JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub revision: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub branch: String,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.into(),
            revision: DEFAULT_REVISION.into(),
            branch: DEFAULT_BRANCH.into(),
        }
    }
}

impl VersionInfo {
    /// First 8 characters of the revision, or the whole revision if shorter.
    pub fn short_revision(&self) -> &str {
        match self.revision.char_indices().nth(SHORT_REVISION_LEN) {
            Some((idx, _)) => &self.revision[..idx],
            None => &self.revision,
        }
    }

    /// Version and short revision joined by a hyphen, e.g. `1.2.3-deadbeef`.
    pub fn version_revision(&self) -> String {
        format!("{}{VERSION_CONCAT}{}", self.version, self.short_revision())
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(version={}, branch={}, revision={})",
            self.version, self.branch, self.revision
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(version: &str, revision: &str, branch: &str) -> VersionInfo {
        VersionInfo {
            version: version.into(),
            revision: revision.into(),
            branch: branch.into(),
        }
    }

    #[test]
    fn default_uses_placeholder_values() {
        let v = VersionInfo::default();
        assert_eq!(v.version, "0.0.0");
        assert_eq!(v.revision, "HEAD");
        assert_eq!(v.branch, "trunk");
    }

    #[test]
    fn short_revision_truncates_long_hashes() {
        assert_eq!(info("1", "deadbeefcafe", "main").short_revision(), "deadbeef");
        assert_eq!(info("1", "deadbeef", "main").short_revision(), "deadbeef");
        assert_eq!(info("1", "abc", "main").short_revision(), "abc");
        assert_eq!(info("1", "", "main").short_revision(), "");
    }

    #[test]
    fn version_revision_joins_with_hyphen() {
        assert_eq!(
            info("1.2.3", "deadbeefcafe", "main").version_revision(),
            "1.2.3-deadbeef"
        );
        assert_eq!(VersionInfo::default().version_revision(), "0.0.0-HEAD");
    }

    #[test]
    fn display_lists_all_fields() {
        assert_eq!(
            info("1", "2", "3").to_string(),
            "(version=1, branch=3, revision=2)"
        );
    }

    #[test]
    fn optional_instances_compare_nil_safe() {
        let none: Option<VersionInfo> = None;
        assert_eq!(none, None);
        assert_ne!(none, Some(VersionInfo::default()));
        assert_eq!(Some(info("1", "2", "3")), Some(info("1", "2", "3")));
        assert_ne!(info("1", "2", "3"), info("1", "2", "4"));
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let have = info("1.0.0", "cafe", "release");
        let json = serde_json::to_string(&have).unwrap();
        let got: VersionInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(got, have);
    }

    #[test]
    fn json_missing_fields_use_defaults_and_empty_fields_are_omitted() {
        let got: VersionInfo = serde_json::from_str(r#"{"version":"2"}"#).unwrap();
        assert_eq!(got, info("2", DEFAULT_REVISION, DEFAULT_BRANCH));

        let json = serde_json::to_string(&info("", "r", "")).unwrap();
        assert_eq!(json, r#"{"revision":"r"}"#);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn field() -> impl Strategy<Value = String> {
            proptest::string::string_regex("\\PC{1,32}").expect("regex")
        }

        proptest! {
            #[test]
            fn json_round_trips_populated_records(v in field(), r in field(), b in field()) {
                let have = info(&v, &r, &b);
                let json = serde_json::to_vec(&have).expect("serialize");
                let got: VersionInfo = serde_json::from_slice(&json).expect("deserialize");
                prop_assert_eq!(got, have);
            }

            #[test]
            fn short_revision_is_a_bounded_prefix(r in field()) {
                let have = info("1", &r, "main");
                let short = have.short_revision();
                prop_assert!(r.starts_with(short));
                prop_assert_eq!(short.chars().count(), r.chars().count().min(SHORT_REVISION_LEN));
            }
        }
    }
}
