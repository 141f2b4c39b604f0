//! Environment source querying the operating system.

use chrono::{TimeZone, Utc};
use std::env;
use std::fmt;

use crate::environment_info::EnvironmentInfo;
use crate::error::SourceError;

/// User and host value used for reproducible builds.
pub const REPRODUCIBLE_PLACEHOLDER: &str = "reproducible";

const USER_VARS: [&str; 3] = ["USER", "LOGNAME", "USERNAME"];

/// Produces user/host/date of the current build.
///
/// A non-negative build timestamp selects reproducible mode: user and host
/// become [`REPRODUCIBLE_PLACEHOLDER`], the date is the timestamp, and the
/// OS is never queried. A negative timestamp selects live mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsSource {
    build_timestamp: i64,
}

impl OsSource {
    pub fn new(build_timestamp: i64) -> Self {
        Self { build_timestamp }
    }

    pub fn live() -> Self {
        Self::new(-1)
    }

    pub fn is_reproducible(&self) -> bool {
        self.build_timestamp >= 0
    }

    pub fn build_timestamp(&self) -> i64 {
        self.build_timestamp
    }

    pub fn parse_environment_info(&self) -> Result<EnvironmentInfo, SourceError> {
        self.parse_environment_info_with(system_hostname, || {
            current_user_with(account_name, |name| env::var(name).ok())
        })
    }

    /// [`OsSource::parse_environment_info`] with injected OS lookups.
    pub fn parse_environment_info_with<FHost, FUser>(
        &self,
        hostname: FHost,
        user: FUser,
    ) -> Result<EnvironmentInfo, SourceError>
    where
        FHost: FnOnce() -> Result<String, SourceError>,
        FUser: FnOnce() -> Result<String, SourceError>,
    {
        if self.is_reproducible() {
            let date = Utc
                .timestamp_opt(self.build_timestamp, 0)
                .single()
                .ok_or(SourceError::InvalidTimestamp(self.build_timestamp))?;
            return Ok(EnvironmentInfo {
                user: REPRODUCIBLE_PLACEHOLDER.into(),
                host: REPRODUCIBLE_PLACEHOLDER.into(),
                date,
            });
        }

        let date = Utc::now();
        let host = hostname()?;
        let user = user()?;
        Ok(EnvironmentInfo { user, host, date })
    }
}

impl fmt::Display for OsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(build_timestamp={})", self.build_timestamp)
    }
}

fn system_hostname() -> Result<String, SourceError> {
    hostname::get()
        .map(|value| value.to_string_lossy().to_string())
        .map_err(|e| SourceError::OsQuery(format!("unable to determine hostname: {e}")))
}

/// Current user name: the account owning the process uid, then the login
/// environment.
pub fn current_user_with<FOs, FEnv>(os_lookup: FOs, env_lookup: FEnv) -> Result<String, SourceError>
where
    FOs: FnOnce() -> Option<String>,
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(name) = os_lookup().filter(|name| !name.is_empty()) {
        return Ok(name);
    }
    tracing::debug!("no account entry for the process uid, trying environment");

    USER_VARS
        .iter()
        .filter_map(|name| env_lookup(*name))
        .find(|value| !value.is_empty())
        .ok_or_else(|| {
            SourceError::OsQuery(format!(
                "unable to determine current user: no account for the process uid and none of {} is set",
                USER_VARS.join(", ")
            ))
        })
}

/// Account name of the effective uid from the password database.
#[cfg(unix)]
fn account_name() -> Option<String> {
    use std::ffi::CStr;

    const MAX_BUFFER: usize = 1 << 20;

    let uid = unsafe { libc::geteuid() };
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        // SAFETY: `entry`, `buf` and `found` outlive the call and `buf.len()`
        // is the capacity handed over.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || found.is_null() || entry.pw_name.is_null() {
            return None;
        }
        // SAFETY: a successful lookup points `pw_name` at a NUL-terminated
        // string inside `buf`.
        let name = unsafe { CStr::from_ptr(entry.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}
