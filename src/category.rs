/// File categorization by extension.
///
/// This module maps file extensions to broad category labels ("Images",
/// "Documents", ...) using an ordered table of category → extension list
/// entries. The table is built once (from the built-in defaults or from a
/// configuration file) and is immutable for the duration of a run.
///
/// # Examples
///
/// ```
/// use declutter::category::CategoryTable;
///
/// let table = CategoryTable::default();
/// assert_eq!(table.resolve(".jpg"), "Images");
/// assert_eq!(table.resolve("PDF"), "Documents");
/// assert_eq!(table.resolve(".xyz"), "Other");
/// ```
use std::collections::HashMap;

/// Category assigned to extensions no table entry claims.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Ordered mapping from category names to the extensions they own.
///
/// Entry order is significant: if two categories list the same extension,
/// the category that appears first in the table wins. Lookups go through a
/// pre-built index so resolution stays O(1) per file.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<(String, Vec<String>)>,
    by_extension: HashMap<String, String>,
}

impl CategoryTable {
    /// Builds a table from `(category, extensions)` entries, preserving
    /// their order. Extensions are normalized to lowercase with a leading
    /// dot; a duplicate extension keeps its first owner.
    pub fn from_entries(entries: Vec<(String, Vec<String>)>) -> Self {
        let mut by_extension = HashMap::new();
        for (category, extensions) in &entries {
            for ext in extensions {
                let key = Self::normalize(ext);
                if key.is_empty() {
                    continue;
                }
                by_extension
                    .entry(key)
                    .or_insert_with(|| category.clone());
            }
        }
        Self {
            entries,
            by_extension,
        }
    }

    /// Resolves an extension to its category name.
    ///
    /// The input may or may not carry a leading dot and is matched
    /// case-insensitively. Extensions not present in the table resolve to
    /// [`FALLBACK_CATEGORY`]. Total over all strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use declutter::category::CategoryTable;
    ///
    /// let table = CategoryTable::default();
    /// assert_eq!(table.resolve(".JPG"), table.resolve("jpg"));
    /// ```
    pub fn resolve(&self, extension: &str) -> &str {
        self.by_extension
            .get(&Self::normalize(extension))
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Category names in table order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of categories in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowercases and prefixes a dot; empty input stays empty so it can
    /// never match a table entry.
    fn normalize(extension: &str) -> String {
        if extension.is_empty() {
            return String::new();
        }
        let lower = extension.to_lowercase();
        if lower.starts_with('.') {
            lower
        } else {
            format!(".{lower}")
        }
    }
}

impl Default for CategoryTable {
    /// The built-in table used when no configuration file is supplied.
    fn default() -> Self {
        let entries = [
            (
                "Images",
                vec![
                    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".tiff", ".ico",
                ],
            ),
            (
                "Documents",
                vec![".pdf", ".docx", ".txt", ".rtf", ".odt", ".pages", ".doc"],
            ),
            (
                "Videos",
                vec![".mp4", ".mov", ".avi", ".mkv", ".wmv", ".flv", ".webm", ".m4v"],
            ),
            (
                "Audio",
                vec![".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a"],
            ),
            (
                "Archives",
                vec![".zip", ".tar.gz", ".rar", ".7z", ".tar", ".gz", ".bz2"],
            ),
            (
                "Code",
                vec![
                    ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".h", ".php", ".rb",
                ],
            ),
            (
                "Spreadsheets",
                vec![".xlsx", ".xls", ".csv", ".ods", ".numbers"],
            ),
            ("Presentations", vec![".pptx", ".ppt", ".odp", ".key"]),
            (
                "Executables",
                vec![".exe", ".msi", ".dmg", ".pkg", ".deb", ".rpm", ".app"],
            ),
            ("Fonts", vec![".ttf", ".otf", ".woff", ".woff2", ".eot"]),
        ];

        Self::from_entries(
            entries
                .into_iter()
                .map(|(name, exts)| {
                    (
                        name.to_string(),
                        exts.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
        )
    }
}
