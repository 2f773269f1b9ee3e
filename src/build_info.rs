//! Build information module
//!
//! Compile-time constants describing this binary.

use serde::Serialize;

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRILOG_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile the binary was built with (debug/release)
pub const BUILD_PROFILE: &str = match option_env!("NUTRILOG_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// Target triple
pub const BUILD_TARGET: &str = match option_env!("NUTRILOG_BUILD_TARGET") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub profile: &'static str,
    pub target: &'static str,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            profile: BUILD_PROFILE,
            target: BUILD_TARGET,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Nutrilog - food, supplement & weight log");
    eprintln!("  Version: {} ({} / {})", info.version, info.profile, info.target);
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("===============================================");
}
