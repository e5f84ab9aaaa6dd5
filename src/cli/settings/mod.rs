//! Settings management for the `set` and `unset` subcommands.
//!
//! Each configuration key has a [`SettingHandler`]; the [`SettingRegistry`]
//! maps user-facing keys (`base-url`, `sidebar`, ...) to them.

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;

use std::path::Path;

pub use error::SettingError;
pub use registry::SettingRegistry;

/// Context provided to setting handlers during set/unset operations.
pub struct SetContext<'a> {
    /// Config file the change is written to.
    pub config_path: &'a Path,
}

/// Handles one configuration key.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the value from the words given after the key.
    ///
    /// Returns the success message to display.
    fn set(&self, args: &[String], ctx: &SetContext<'_>) -> Result<String, SettingError>;

    /// Clear the value so the default applies again.
    fn unset(&self, ctx: &SetContext<'_>) -> Result<String, SettingError>;
}
