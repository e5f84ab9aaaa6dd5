//! Helper functions for settings operations.

use reqwest::Url;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::utils::url::normalize_base_url;

use super::error::SettingError;
use super::SetContext;

/// Wrapper around [`Config::mutate_at`] that maps errors to
/// [`SettingError::ConfigError`].
pub fn mutate_config<F>(ctx: &SetContext<'_>, f: F) -> Result<(), SettingError>
where
    F: FnOnce(&mut Config),
{
    Config::mutate_at(ctx.config_path, f).map_err(|e| SettingError::ConfigError(e.to_string()))
}

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

/// Accepts absolute `http`/`https` URLs and strips trailing slashes.
pub fn validate_base_url(input: &str) -> Result<String, String> {
    let url = Url::parse(input.trim()).map_err(|err| err.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(normalize_base_url(input)),
        other => Err(format!("unsupported scheme '{other}', expected http or https")),
    }
}

pub fn validate_log_filter(input: &str) -> Result<String, String> {
    let directive = input.trim();
    EnvFilter::try_new(directive).map_err(|err| err.to_string())?;
    Ok(directive.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for input in ["on", "TRUE", "yes", "1", " On "] {
            assert_eq!(parse_bool(input), Some(true), "{input}");
        }
        for input in ["off", "False", "no", "0"] {
            assert_eq!(parse_bool(input), Some(false), "{input}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn base_url_must_be_http() {
        assert_eq!(
            validate_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert!(validate_base_url("https://chat.example.com").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("localhost:8000/api").is_err());
    }

    #[test]
    fn log_filter_is_checked_by_env_filter() {
        assert_eq!(validate_log_filter(" parlor=debug ").unwrap(), "parlor=debug");
        assert!(validate_log_filter("parlor=loud").is_err());
    }
}
