//! Diagnostic logging setup.
//!
//! The interactive client owns the terminal, so its `tracing` output goes to
//! a file. Headless subcommands log to stderr unless a file is requested.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PARLOR_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Location of the log file when neither the CLI nor the config names one.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "parlor", "parlor").map(|dirs| dirs.cache_dir().join("parlor.log"))
}

/// Install the global subscriber.
///
/// `PARLOR_LOG` wins over `configured_filter`; an unparsable directive falls
/// back to `info`.
pub fn init_logging(target: &LogTarget, configured_filter: Option<&str>) -> Result<(), Box<dyn Error>> {
    let filter = build_filter(std::env::var(LOG_ENV_VAR).ok(), configured_filter);

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| err.to_string())?,
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err.to_string())?
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File, Box<dyn Error>> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

fn build_filter(env_value: Option<String>, configured: Option<&str>) -> EnvFilter {
    env_value
        .as_deref()
        .into_iter()
        .chain(configured)
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
