use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const BASE_URL_ENV_VAR: &str = "PARLOR_BASE_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the chat backend, e.g. `http://127.0.0.1:8000`
    pub base_url: Option<String>,
    /// Diagnostic log destination for the interactive client
    pub log_file: Option<String>,
    /// `tracing` filter directive, e.g. `parlor=debug`
    pub log_filter: Option<String>,
    /// Show the conversation sidebar at startup
    pub show_sidebar: Option<bool>,
}

/// Display a path with the home directory abbreviated as `~`.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Pick the backend URL: CLI flag, then `PARLOR_BASE_URL`, then the
    /// config file, then [`DEFAULT_BASE_URL`].
    pub fn resolve_base_url(&self, cli_value: Option<&str>) -> String {
        let env_value = std::env::var(BASE_URL_ENV_VAR).ok();
        self.resolve_base_url_with(cli_value, env_value.as_deref())
    }

    pub(crate) fn resolve_base_url_with(
        &self,
        cli_value: Option<&str>,
        env_value: Option<&str>,
    ) -> String {
        non_empty(cli_value)
            .or_else(|| non_empty(env_value))
            .or_else(|| non_empty(self.base_url.as_deref()))
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    pub fn sidebar_visible(&self) -> bool {
        self.show_sidebar.unwrap_or(true)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        non_empty(self.log_file.as_deref()).map(PathBuf::from)
    }

    pub fn log_filter(&self) -> Option<&str> {
        non_empty(self.log_filter.as_deref())
    }
}
