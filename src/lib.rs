//! buildinfo: build and version metadata for embedding into artifacts.
//!
//! Given a project directory, the crate determines version, revision and
//! branch from a `VERSION` file, an RPM spec file or a Git repository, pairs
//! them with user/host/date of the build and exposes the result as a
//! [`BuildInfo`] record that serializes to flat JSON.
//!
//! # Quick start
//!
//! ```no_run
//! use buildinfo::command::SystemCommandRunner;
//! use buildinfo::source::{resolve_environment_source, resolve_version_source};
//! use buildinfo::BuildInfo;
//! use std::path::Path;
//!
//! let runner = SystemCommandRunner;
//! let version = resolve_version_source(Path::new("."), &runner)?
//!     .parse_version_info(&runner)?;
//! let environment = resolve_environment_source()?.parse_environment_info()?;
//! let info = BuildInfo::new(version, environment);
//! println!("{}", info.print("demo"));
//! # Ok::<(), buildinfo::error::SourceError>(())
//! ```

pub mod build_info;
pub mod command;
pub mod environment_info;
pub mod error;
pub mod render;
pub mod source;
#[cfg(test)]
pub mod testsupport;
pub mod toolchain;
pub mod version_info;

pub use build_info::BuildInfo;
pub use environment_info::EnvironmentInfo;
pub use version_info::VersionInfo;
