//! Runtime configuration
//!
//! Everything is read from environment variables, with defaults relative to the
//! project root.

use std::path::PathBuf;

use crate::reference::LoadPolicy;

/// Reference data location override
pub const REFERENCE_PATH_VAR: &str = "NUTRILOG_REFERENCE_PATH";
/// Set to `1`/`true` to abort on the first malformed reference row
pub const STRICT_REFERENCE_VAR: &str = "NUTRILOG_STRICT_REFERENCE";
/// Directory for rendered charts
pub const CHART_DIR_VAR: &str = "NUTRILOG_CHART_DIR";

/// Default reference data file name
pub const REFERENCE_FILE_NAME: &str = "cleaned_food_data.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub reference_path: PathBuf,
    pub load_policy: LoadPolicy,
    pub chart_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let reference_path = std::env::var(REFERENCE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir().join(REFERENCE_FILE_NAME));

        let load_policy = match std::env::var(STRICT_REFERENCE_VAR) {
            Ok(v) if parse_flag(&v) => LoadPolicy::FailFast,
            _ => LoadPolicy::SkipInvalid,
        };

        let chart_dir = std::env::var(CHART_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir().join("charts"));

        Self {
            reference_path,
            load_policy,
            chart_dir,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// `<project>/data`, found by walking up from target/{debug,release}
fn data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_data_dir_ends_in_data() {
        assert!(data_dir().ends_with("data"));
    }
}
