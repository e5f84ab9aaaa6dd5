use crate::core::config::data::{Config, DEFAULT_BASE_URL};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.summary_lines() {
            println!("{line}");
        }
    }

    pub(crate) fn summary_lines(&self) -> Vec<String> {
        let or_unset = |value: &Option<String>, default: &str| match value {
            Some(value) => value.clone(),
            None => format!("(unset, default: {default})"),
        };
        vec![
            format!("  base-url: {}", or_unset(&self.base_url, DEFAULT_BASE_URL)),
            format!("  log-file: {}", or_unset(&self.log_file, "cache directory")),
            format!("  log-filter: {}", or_unset(&self.log_filter, "info")),
            match self.show_sidebar {
                Some(true) => "  sidebar: on".to_string(),
                Some(false) => "  sidebar: off".to_string(),
                None => "  sidebar: (unset, default: on)".to_string(),
            },
        ]
    }
}
