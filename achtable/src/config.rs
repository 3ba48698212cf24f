//! Settings read from the environment.
//!
//! `main` loads a `.env` file first with `dotenvy`, so every variable below can
//! live there too. Command-line flags override these values.
//!
//! | variable              | default  |
//! |-----------------------|----------|
//! | `ACHTABLE_DELIMITER`  | `,`      |
//! | `ACHTABLE_QUIET`      | off      |
//! | `ACHTABLE_TABLES_DIR` | `tables` |

use std::env;
use std::path::PathBuf;

pub const DELIMITER_VAR: &str = "ACHTABLE_DELIMITER";
pub const QUIET_VAR: &str = "ACHTABLE_QUIET";
pub const TABLES_DIR_VAR: &str = "ACHTABLE_TABLES_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// CSV delimiter for table files.
    pub delimiter: u8,
    /// Suppress log output on stderr.
    pub quiet: bool,
    /// Directory holding the table CSVs.
    pub tables_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quiet: false,
            tables_dir: PathBuf::from("tables"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or unusable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(delimiter) = lookup(DELIMITER_VAR).as_deref().and_then(parse_delimiter) {
            settings.delimiter = delimiter;
        }
        if let Some(quiet) = lookup(QUIET_VAR) {
            settings.quiet = parse_flag(&quiet);
        }
        if let Some(dir) = lookup(TABLES_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            settings.tables_dir = PathBuf::from(dir.trim());
        }
        settings
    }
}

/// A single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(value: &str) -> Option<u8> {
    match value {
        "tab" | "\\t" | "\t" => Some(b'\t'),
        _ => {
            let mut chars = value.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Some(c as u8),
                _ => None,
            }
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
