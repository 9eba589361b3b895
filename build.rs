use std::process::Command;

/// Export `key` to the crate: an explicit env var set by release tooling
/// wins, otherwise `fallback` supplies the value.
fn stamp(key: &str, fallback: impl FnOnce() -> String) {
    println!("cargo:rerun-if-env-changed={key}");
    let value = std::env::var(key).unwrap_or_else(|_| fallback());
    println!("cargo:rustc-env={key}={value}");
}

fn git_describe() -> String {
    Command::new("git")
        .args(["describe", "--always", "--dirty", "--exclude", "*"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    stamp("BLOC_GRID_VERSION", || {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default()
    });
    stamp("BLOC_GRID_COMMIT", git_describe);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
