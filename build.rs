//! Build script for nutrilog
//!
//! Embeds the build timestamp, profile and target triple for the startup banner
//! and the status tool.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=NUTRILOG_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=NUTRILOG_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=NUTRILOG_BUILD_TARGET={}", target);
}
