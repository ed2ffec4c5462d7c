//! Category-table configuration loading.
//!
//! The built-in category table can be replaced by a JSON document mapping
//! category names to extension lists:
//!
//! ```json
//! {
//!     "Images": [".jpg", ".png"],
//!     "Documents": [".pdf", ".txt"]
//! }
//! ```
//!
//! Key order in the document is the table's resolution order, which is why
//! `serde_json` runs with `preserve_order`. Configuration is strictly
//! fail-soft: absence or any load failure leaves the defaults in effect and
//! is logged as a warning, never treated as fatal.
//!
//! Lookup order when no path is given explicitly:
//! 1. `.declutter.json` in the current directory
//! 2. `~/.config/declutter/config.json`
//! 3. built-in defaults

use crate::category::CategoryTable;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading a category-table file.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    NotFound(PathBuf),
    /// The file is not valid JSON, or not the expected shape.
    Invalid(String),
    /// IO error while reading the file.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads the category table, falling back to the defaults on any problem.
///
/// When `explicit` is given, only that file is tried; otherwise the lookup
/// order documented on this module applies. Every failure path logs a
/// warning and returns [`CategoryTable::default`].
pub fn load_category_table(explicit: Option<&Path>) -> CategoryTable {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(find_config_file) else {
        return CategoryTable::default();
    };

    match read_table_file(&path) {
        Ok(table) => {
            log::info!(
                "Loaded category table from {} ({} categories)",
                path.display(),
                table.len()
            );
            table
        }
        Err(e) => {
            log::warn!("{e}; using built-in category table");
            CategoryTable::default()
        }
    }
}

/// Looks for a config file in the current directory, then under HOME.
fn find_config_file() -> Option<PathBuf> {
    let local_config = PathBuf::from(".declutter.json");
    if local_config.exists() {
        return Some(local_config);
    }

    if let Ok(home) = std::env::var("HOME") {
        let home_config = PathBuf::from(home)
            .join(".config")
            .join("declutter")
            .join("config.json");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

/// Parses a category-table document into a [`CategoryTable`].
///
/// The top level must be an object whose values are arrays of strings; key
/// order is preserved as table order.
pub fn read_table_file(path: &Path) -> Result<CategoryTable, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    let document: serde_json::Map<String, Value> =
        serde_json::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    let mut entries = Vec::with_capacity(document.len());
    for (category, value) in document {
        let list = value.as_array().ok_or_else(|| {
            ConfigError::Invalid(format!(
                "category '{}' is not an array of extensions",
                category
            ))
        })?;

        let extensions: Result<Vec<String>, ConfigError> = list
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "category '{}' contains a non-string extension",
                        category
                    ))
                })
            })
            .collect();

        entries.push((category, extensions?));
    }

    if entries.is_empty() {
        return Err(ConfigError::Invalid("no categories defined".to_string()));
    }

    Ok(CategoryTable::from_entries(entries))
}
