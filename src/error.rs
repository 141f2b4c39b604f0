//! Unified error types for build metadata extraction.

use std::fmt;
use std::path::PathBuf;

use crate::source::SourceKind;

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Errors from running an external executable.
#[derive(Debug)]
pub enum CommandError {
    /// The process could not be started at all.
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// The process reported a diagnostic on stderr (trimmed, verbatim).
    Stderr(String),
    /// The process failed without any diagnostic text. Signal-terminated
    /// processes report `-1`.
    Status(i32),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => write!(f, "{program}: {source}"),
            Self::Stderr(text) => f.write_str(text),
            Self::Status(code) => write!(f, "exit status {code}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

/// Errors raised while detecting or parsing version/environment sources.
#[derive(Debug)]
pub enum SourceError {
    /// The source does not apply to the directory. The resolver falls through
    /// to the next candidate on this variant and on nothing else.
    NotApplicable { kind: SourceKind, dir: PathBuf },
    /// Mandatory version segment is empty or missing.
    MalformedVersion,
    /// Revision segment is present but empty.
    MalformedRevision,
    /// Branch segment is present but empty.
    MalformedBranch,
    Io(std::io::Error),
    /// An external tool failed while answering a query.
    Command {
        context: String,
        source: CommandError,
    },
    /// Hostname or user lookup failed in live environment mode.
    OsQuery(String),
    /// `SOURCE_DATE_EPOCH` is set but is not an integer.
    InvalidSourceDateEpoch { value: String, reason: String },
    /// Reproducible timestamp is outside the representable date range.
    InvalidTimestamp(i64),
    /// No candidate source applied to the directory.
    Undetected(PathBuf),
}

impl SourceError {
    /// True for the signal that lets resolution fall through.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }

    pub(crate) fn command(context: impl Into<String>, source: CommandError) -> Self {
        Self::Command {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable { kind, dir } => {
                write!(f, "no {kind} version source in {}", dir.display())
            }
            Self::MalformedVersion => write!(f, "malformed version information"),
            Self::MalformedRevision => write!(f, "malformed revision information"),
            Self::MalformedBranch => write!(f, "malformed branch information"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Command { context, source } => write!(f, "{context}: {source}"),
            Self::OsQuery(msg) => write!(f, "environment: {msg}"),
            Self::InvalidSourceDateEpoch { value, reason } => {
                write!(f, "unable to parse SOURCE_DATE_EPOCH `{value}`: {reason}")
            }
            Self::InvalidTimestamp(ts) => write!(f, "build timestamp {ts} is out of range"),
            Self::Undetected(dir) => write!(
                f,
                "unable to detect version control system in {}",
                dir.display()
            ),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Command { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Top-level error type for the `buildinfo` application.
#[derive(Debug)]
pub enum AppError {
    Source(SourceError),
    Json(serde_json::Error),
    /// Writing rendered output failed.
    Output { target: String, source: std::io::Error },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "json: {e}"),
            Self::Output { target, source } => write!(f, "unable to write {target}: {source}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Output { source, .. } => Some(source),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_display_surfaces_stderr_verbatim() {
        assert_eq!(CommandError::Stderr("error: foo".into()).to_string(), "error: foo");
        assert_eq!(CommandError::Status(1).to_string(), "exit status 1");
    }

    #[test]
    fn command_error_spawn_names_program() {
        let e = CommandError::Spawn {
            program: "/opt/fail-inc/bin/foo-bar".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        let s = e.to_string();
        assert!(s.starts_with("/opt/fail-inc/bin/foo-bar:"), "got: {s}");
        assert!(s.contains("No such file or directory"));
    }

    #[test]
    fn only_not_applicable_allows_fallthrough() {
        let skipped = SourceError::NotApplicable {
            kind: SourceKind::Git,
            dir: PathBuf::from("/src"),
        };
        assert!(skipped.is_not_applicable());
        assert!(!SourceError::MalformedVersion.is_not_applicable());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!SourceError::from(io).is_not_applicable());
    }

    #[test]
    fn source_error_display_variants() {
        assert_eq!(
            SourceError::MalformedRevision.to_string(),
            "malformed revision information"
        );
        assert_eq!(
            SourceError::Undetected(PathBuf::from("/src")).to_string(),
            "unable to detect version control system in /src"
        );
        let e = SourceError::command(
            "unable to determine git HEAD revision",
            CommandError::Stderr("fatal: bad object".into()),
        );
        assert_eq!(
            e.to_string(),
            "unable to determine git HEAD revision: fatal: bad object"
        );
    }

    #[test]
    fn app_error_from_source_error_keeps_message() {
        let e = AppError::from(SourceError::MalformedBranch);
        assert_eq!(e.to_string(), "malformed branch information");
    }
}
