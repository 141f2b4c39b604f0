//! Captures the tool's own commit and compiler version for `--version` and
//! the build report. Unavailable values become "unknown".

use std::env;
use std::fs;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    watch_git_head();
    println!("cargo:rerun-if-env-changed=BUILDINFO_BUILD_GIT_HASH");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let git_hash = env::var("BUILDINFO_BUILD_GIT_HASH")
        .ok()
        .filter(|hash| !hash.trim().is_empty())
        .or_else(|| capture("git", &["rev-parse", "--short=12", "HEAD"]))
        .unwrap_or_else(|| UNKNOWN.to_string());

    // `rustc 1.80.0 (051478957 2024-07-21)` -> `1.80.0`
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = capture(&rustc, &["--version"])
        .and_then(|text| text.split_whitespace().nth(1).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN.to_string());

    println!("cargo:rustc-env=BUILDINFO_BUILD_GIT_HASH={git_hash}");
    println!("cargo:rustc-env=BUILDINFO_RUSTC_VERSION={rustc_version}");
}

/// Rebuild when HEAD moves, including commits on the checked-out branch.
fn watch_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    let reference = fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.trim().strip_prefix("ref: ").map(str::to_string));
    if let Some(reference) = reference {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }
}

/// Trimmed stdout of a successful, non-empty command run.
fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|text| !text.is_empty())
}
