//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{base_url_handler, log_file_handler, log_filter_handler, sidebar_handler};
use super::{SetContext, SettingError, SettingHandler};

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(base_url_handler()));
        registry.register(Box::new(log_file_handler()));
        registry.register(Box::new(log_filter_handler()));
        registry.register(Box::new(sidebar_handler()));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }

    pub fn set(
        &self,
        key: &str,
        args: &[String],
        ctx: &SetContext<'_>,
    ) -> Result<String, SettingError> {
        self.lookup(key)?.set(args, ctx)
    }

    pub fn unset(&self, key: &str, ctx: &SetContext<'_>) -> Result<String, SettingError> {
        self.lookup(key)?.unset(ctx)
    }

    fn lookup(&self, key: &str) -> Result<&dyn SettingHandler, SettingError> {
        self.get(key)
            .ok_or_else(|| SettingError::UnknownKey(key.to_string()))
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use tempfile::TempDir;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keys_follow_config_summary_order() {
        let registry = SettingRegistry::new();
        assert_eq!(
            registry.keys_display_order(),
            &["base-url", "log-file", "log-filter", "sidebar"]
        );
    }

    #[test]
    fn set_and_unset_persist_to_the_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let ctx = SetContext { config_path: &path };
        let registry = SettingRegistry::new();

        let message = registry
            .set("base-url", &args(&["http://10.0.0.5:9000/"]), &ctx)
            .unwrap();
        assert_eq!(message, "✅ Set base-url to: http://10.0.0.5:9000");
        registry.set("sidebar", &args(&["off"]), &ctx).unwrap();
        registry
            .set("log-file", &args(&["/tmp/parlor", "chat.log"]), &ctx)
            .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://10.0.0.5:9000"));
        assert_eq!(config.show_sidebar, Some(false));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/parlor chat.log"));

        registry.unset("sidebar", &ctx).unwrap();
        registry.unset("base-url", &ctx).unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.show_sidebar, None);
        assert_eq!(config.base_url, None);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/parlor chat.log"));
    }

    #[test]
    fn invalid_values_leave_the_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let ctx = SetContext { config_path: &path };
        let registry = SettingRegistry::new();

        assert!(matches!(
            registry.set("sidebar", &args(&["sometimes"]), &ctx),
            Err(SettingError::InvalidBoolean(_))
        ));
        assert!(matches!(
            registry.set("base-url", &args(&["ftp://example.com"]), &ctx),
            Err(SettingError::InvalidValue { key: "base-url", .. })
        ));
        assert!(matches!(
            registry.set("log-filter", &[], &ctx),
            Err(SettingError::MissingArgs { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn unknown_keys_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let ctx = SetContext { config_path: &path };
        let registry = SettingRegistry::new();

        let err = registry.unset("theme", &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Unknown config key: theme");
    }
}
