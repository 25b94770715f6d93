use std::process::Command;

// Exposes GIT_VERSION to the crate: the package version, plus the commit it
// was built from when a git checkout is available.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    let version = match describe() {
        Some(rev) => format!("{pkg}+{rev}"),
        None => pkg,
    };
    println!("cargo:rustc-env=GIT_VERSION={version}");
}

/// Short commit hash, suffixed `.dirty` for a modified tree.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty=.dirty", "--abbrev=10", "--exclude=*"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| format!("g{rev}"))
}
