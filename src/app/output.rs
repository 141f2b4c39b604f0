use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use buildinfo::error::AppError;

/// Where the rendered record goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `None`, empty and `-` all mean stdout.
    pub(crate) fn from_filename(filename: Option<&str>) -> Self {
        match filename {
            None | Some("") | Some("-") => Self::Stdout,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    pub(crate) fn write(&self, data: &[u8]) -> Result<(), AppError> {
        let result = match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(data).and_then(|_| out.flush())
            }
            Self::File(path) => write_file(path, data),
        };
        result.map_err(|source| AppError::Output {
            target: self.to_string(),
            source,
        })
    }
}

fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("STDOUT"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_aliases() {
        assert_eq!(OutputTarget::from_filename(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_filename(Some("")), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_filename(Some("-")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_filename(Some("out.json")),
            OutputTarget::File(PathBuf::from("out.json"))
        );
    }

    #[test]
    fn display_names_target() {
        assert_eq!(OutputTarget::Stdout.to_string(), "STDOUT");
        assert_eq!(
            OutputTarget::File(PathBuf::from("a/b.json")).to_string(),
            "a/b.json"
        );
    }

    #[test]
    fn file_target_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x/y/info.json");
        OutputTarget::File(path.clone()).write(b"{}").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn unwritable_target_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::File(dir.path().to_path_buf());
        let err = target.write(b"{}").unwrap_err();
        assert!(matches!(err, AppError::Output { .. }), "got: {err:?}");
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }
}
