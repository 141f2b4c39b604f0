//! Compile-time toolchain identity used by build reports.
//!
//! These are process-wide constants captured by `build.rs`; nothing in the
//! crate mutates them at runtime.

/// Semver package version of this tool from `Cargo.toml`.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash of this tool captured at build time.
pub const TOOL_GIT_COMMIT: &str = env!("BUILDINFO_BUILD_GIT_HASH");

/// Version of the rustc that compiled this tool.
pub const RUSTC_VERSION: &str = env!("BUILDINFO_RUSTC_VERSION");

/// Target operating system, e.g. `linux`.
pub const OS: &str = std::env::consts::OS;

/// Target architecture, e.g. `x86_64`.
pub const ARCH: &str = std::env::consts::ARCH;

/// `os/arch` pair as shown in build reports.
pub fn platform() -> String {
    format!("{OS}/{ARCH}")
}

/// Version block shown by `buildinfo --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("BUILDINFO_BUILD_GIT_HASH"),
    "\nrustc: ",
    env!("BUILDINFO_RUSTC_VERSION")
);
