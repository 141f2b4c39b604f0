//! CLI argument parsing via clap.

use clap::Parser;
use std::path::PathBuf;

use crate::app::ParserSelector;
use buildinfo::toolchain;

/// Extract version control and build environment metadata as JSON.
#[derive(Debug, Parser)]
#[command(name = "buildinfo", version, long_version = toolchain::LONG_VERSION)]
pub struct Args {
    /// File path to write data to instead of stdout (`-` means stdout).
    #[arg(short = 'o', long = "filename", env = "BUILDINFO_FILENAME")]
    pub filename: Option<String>,

    /// Project root directory to parse for version information.
    #[arg(
        short = 'C',
        long = "project-dir",
        env = "BUILDINFO_PROJECT_DIR",
        default_value = "."
    )]
    pub project_dir: PathBuf,

    /// Version source to use. `auto` detects file, rpmspec, then git.
    #[arg(
        short = 'p',
        long = "parser",
        env = "BUILDINFO_PARSER_VERSION",
        value_enum,
        default_value_t = ParserSelector::Auto
    )]
    pub parser: ParserSelector,

    /// Git executable used by the git source (default: `git` from PATH).
    #[arg(long = "git-exe", env = "BUILDINFO_GIT_EXE")]
    pub git_exe: Option<String>,

    /// Version value for the mock source.
    #[arg(long = "mock-version", env = "BUILDINFO_MOCK_VERSION", default_value = "")]
    pub mock_version: String,

    /// Revision value for the mock source.
    #[arg(long = "mock-revision", env = "BUILDINFO_MOCK_REVISION", default_value = "")]
    pub mock_revision: String,

    /// Branch value for the mock source.
    #[arg(long = "mock-branch", env = "BUILDINFO_MOCK_BRANCH", default_value = "")]
    pub mock_branch: String,

    /// Indent JSON output by this many spaces (0 = minified).
    #[arg(long = "indent", env = "BUILDINFO_JSON_INDENT", default_value_t = 0)]
    pub indent: usize,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log-level", env = "BUILDINFO_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
