//! Handlers for free-text settings.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{
    mutate_config, success_set, validate_base_url, validate_log_filter,
};
use crate::cli::settings::{SetContext, SettingHandler};
use crate::core::config::{Config, DEFAULT_BASE_URL};

/// Data-driven handler for string settings with an optional validator.
pub struct StringHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    default_display: &'static str,
    validate: Option<fn(&str) -> Result<String, String>>,
    set_field: fn(&mut Config, Option<String>),
}

impl SettingHandler for StringHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], ctx: &SetContext<'_>) -> Result<String, SettingError> {
        let input = args.join(" ");
        if input.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }

        let value = match self.validate {
            Some(validate) => validate(&input).map_err(|reason| SettingError::InvalidValue {
                key: self.key,
                reason,
            })?,
            None => input,
        };
        let message = success_set(self.key, &value);
        let set_field = self.set_field;

        mutate_config(ctx, move |config| set_field(config, Some(value)))?;
        Ok(message)
    }

    fn unset(&self, ctx: &SetContext<'_>) -> Result<String, SettingError> {
        let set_field = self.set_field;
        mutate_config(ctx, move |config| set_field(config, None))?;

        Ok(format!(
            "✅ Unset {} (will use default: {})",
            self.key, self.default_display
        ))
    }
}

/// Create a handler for the `base-url` setting.
pub fn base_url_handler() -> StringHandler {
    StringHandler {
        key: "base-url",
        hint: "To set the backend URL, specify an http or https URL:",
        example: "parlor set base-url http://127.0.0.1:8000",
        default_display: DEFAULT_BASE_URL,
        validate: Some(validate_base_url),
        set_field: |c, v| c.base_url = v,
    }
}

/// Create a handler for the `log-file` setting.
pub fn log_file_handler() -> StringHandler {
    StringHandler {
        key: "log-file",
        hint: "To choose where the chat client writes its log, specify a path:",
        example: "parlor set log-file ~/parlor.log",
        default_display: "cache directory",
        validate: None,
        set_field: |c, v| c.log_file = v,
    }
}

/// Create a handler for the `log-filter` setting.
pub fn log_filter_handler() -> StringHandler {
    StringHandler {
        key: "log-filter",
        hint: "To set the log filter, specify a tracing directive:",
        example: "parlor set log-filter parlor=debug",
        default_display: "info",
        validate: Some(validate_log_filter),
        set_field: |c, v| c.log_filter = v,
    }
}
