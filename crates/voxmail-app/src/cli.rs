//! CLI argument definitions for the Voxmail application.
//!
//! Uses `clap` with derive macros. Priority resolution: CLI args > env vars
//! > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Voxmail — compose and send emails by voice.
#[derive(Parser, Debug)]
#[command(name = "voxmail", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Path to the contact book JSON file.
    #[arg(long = "contacts")]
    pub contacts: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > VOXMAIL_CONFIG env var > ~/.voxmail/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VOXMAIL_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the contact book path.
    ///
    /// Priority: --contacts flag > config file value.
    pub fn resolve_contacts_path(&self, config_path: &str) -> PathBuf {
        self.contacts
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_path))
    }
}

/// Platform default configuration path (~/.voxmail/config.toml).
pub fn default_config_path() -> PathBuf {
    home_dir().join(".voxmail").join("config.toml")
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(path: &std::path::Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path.to_path_buf(),
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
