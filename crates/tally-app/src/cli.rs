//! CLI argument definitions for the Tally application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Tally — a conversational interface over a billing and customer ledger.
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Data directory for the SQLite ledger database.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TALLY_CONFIG env var > ~/.tally/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TALLY_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > TALLY_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("TALLY_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        config_port
    }

    /// Resolve the data directory path.
    ///
    /// Returns `None` if not overridden (use config value).
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    /// Resolve the log level.
    ///
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".tally").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".tally").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_port_flag_wins() {
        let a = args(&["tally", "--port", "8080"]);
        assert_eq!(a.resolve_port(3030), 8080);
    }

    #[test]
    fn test_port_falls_back_to_config() {
        let a = args(&["tally"]);
        // Env may or may not be set in CI; only assert when it isn't.
        if std::env::var("TALLY_PORT").is_err() {
            assert_eq!(a.resolve_port(3030), 3030);
        }
    }

    #[test]
    fn test_config_flag_wins() {
        let a = args(&["tally", "--config", "/tmp/custom.toml"]);
        assert_eq!(a.resolve_config_path(), PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_data_dir_absent() {
        let a = args(&["tally"]);
        assert!(a.resolve_data_dir().is_none());
    }

    #[test]
    fn test_data_dir_flag() {
        let a = args(&["tally", "--data-dir", "/var/lib/tally"]);
        assert_eq!(a.resolve_data_dir().as_deref(), Some("/var/lib/tally"));
    }

    #[test]
    fn test_log_level_flag() {
        let a = args(&["tally", "-l", "debug"]);
        assert_eq!(a.resolve_log_level().as_deref(), Some("debug"));
    }
}
