use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let workspace_root = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default())
        .join("..")
        .join("..");

    let git_sha = Command::new("git")
        .arg("-C")
        .arg(&workspace_root)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());

    let timestamp = chrono::Utc::now().to_rfc3339();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());

    println!("cargo:rustc-env=SRCSCOPE_BUILD_GIT_SHA={git_sha}");
    println!("cargo:rustc-env=SRCSCOPE_BUILD_TIMESTAMP={timestamp}");
    println!("cargo:rustc-env=SRCSCOPE_BUILD_TARGET={target}");
}
