//! Build script for aasd-ds
//!
//! Stamps the binary with the commit it was built from, the build time and
//! the cargo profile. `/health` and the startup log report these.

use std::process::Command;

/// Run git and return trimmed stdout, `None` outside a checkout
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

/// Short commit hash, suffixed with "-dirty" when the tree has local edits
fn source_revision() -> String {
    let Some(hash) = git(&["rev-parse", "--short=8", "HEAD"]) else {
        return "unknown".to_string();
    };
    match git(&["status", "--porcelain", "--untracked-files=no"]) {
        Some(changes) if !changes.is_empty() => format!("{}-dirty", hash),
        _ => hash,
    }
}

fn main() {
    let revision = source_revision();
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", revision);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", built_at);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);

    // The form page is embedded with include_str!
    println!("cargo:rerun-if-changed=src/ui/index.html");
    println!("cargo:rerun-if-changed=src/ui/app.js");
    println!("cargo:rerun-if-changed=build.rs");
    // New commits change the reported revision
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
