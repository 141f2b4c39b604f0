//! Build context: who built the project, where and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default value for [`EnvironmentInfo::user`].
pub const DEFAULT_USER: &str = "unknown";
/// Default value for [`EnvironmentInfo::host`].
pub const DEFAULT_HOST: &str = "localhost";

const USER_CONCAT: &str = "@";

/// User, host and date of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    pub date: DateTime<Utc>,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.into(),
            host: DEFAULT_HOST.into(),
            date: Utc::now(),
        }
    }
}

impl EnvironmentInfo {
    /// User and host joined by `@`.
    pub fn user_host(&self) -> String {
        format!("{}{USER_CONCAT}{}", self.user, self.host)
    }
}

impl fmt::Display for EnvironmentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(user={}, host={}, date={})",
            self.user,
            self.host,
            self.date.to_rfc3339()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch_info(user: &str, host: &str, secs: i64) -> EnvironmentInfo {
        EnvironmentInfo {
            user: user.into(),
            host: host.into(),
            date: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn default_uses_placeholders_and_current_time() {
        let before = Utc::now();
        let info = EnvironmentInfo::default();
        assert_eq!(info.user, "unknown");
        assert_eq!(info.host, "localhost");
        assert!(info.date >= before);
    }

    #[test]
    fn user_host_joins_with_at() {
        assert_eq!(epoch_info("jdoe", "builder", 0).user_host(), "jdoe@builder");
    }

    #[test]
    fn clone_is_independent() {
        let have = epoch_info("a", "b", 3);
        let mut got = have.clone();
        got.user = "c".into();
        assert_eq!(have.user, "a");
        assert_ne!(have, got);
    }

    #[test]
    fn equality_is_nil_safe() {
        let none: Option<EnvironmentInfo> = None;
        assert_eq!(none, None);
        assert_ne!(Some(epoch_info("a", "b", 1)), None);
        assert_ne!(epoch_info("a", "b", 1), epoch_info("a", "b", 2));
    }

    #[test]
    fn json_date_is_rfc3339() {
        let json = serde_json::to_string(&epoch_info("u", "h", 0)).unwrap();
        assert_eq!(json, r#"{"user":"u","host":"h","date":"1970-01-01T00:00:00Z"}"#);
        let back: EnvironmentInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, epoch_info("u", "h", 0));
    }
}
