pub mod data;
pub mod io;
pub mod printing;


pub use data::{path_display, Config, BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
pub use io::ConfigError;
