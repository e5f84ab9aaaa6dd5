//! Setting handlers for the configuration value kinds.

pub mod boolean;
pub mod string;

pub use boolean::*;
pub use string::*;
