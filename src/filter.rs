//! File filtering by name pattern and size.
//!
//! A [`FileFilter`] is compiled once per run from the CLI options and then
//! evaluated against every candidate file. Four predicates combine with
//! logical AND: the name must match the include pattern (if any), must not
//! match the exclude pattern (if any), and the size must sit inside the
//! inclusive min/max bounds.
//!
//! The filter is deliberately fail-open: a pattern that does not compile is
//! logged as a warning and ignored, and a file whose size could not be read
//! passes the size checks. A bad option must never cause files to be
//! silently skipped.

use regex::{Regex, RegexBuilder};

/// Compiled name and size predicates for one organize run.
#[derive(Debug, Default)]
pub struct FileFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
    min_size: Option<u64>,
    max_size: Option<u64>,
}

impl FileFilter {
    /// Compiles the filter. Invalid patterns are dropped with a warning.
    pub fn new(
        include: Option<&str>,
        exclude: Option<&str>,
        min_size: Option<u64>,
        max_size: Option<u64>,
    ) -> Self {
        Self {
            include: include.and_then(|p| Self::compile(p, "include")),
            exclude: exclude.and_then(|p| Self::compile(p, "exclude")),
            min_size,
            max_size,
        }
    }

    /// Evaluates all predicates against a file's base name and size.
    ///
    /// `size` is `None` when the size could not be determined; the size
    /// bounds then pass.
    pub fn passes(&self, file_name: &str, size: Option<u64>) -> bool {
        if let Some(include) = &self.include
            && !include.is_match(file_name)
        {
            return false;
        }

        if let Some(exclude) = &self.exclude
            && exclude.is_match(file_name)
        {
            return false;
        }

        if let Some(size) = size {
            if let Some(min) = self.min_size
                && size < min
            {
                return false;
            }
            if let Some(max) = self.max_size
                && size > max
            {
                return false;
            }
        }

        true
    }

    /// Case-insensitive search compile; `None` (pattern ignored) on error.
    fn compile(pattern: &str, role: &str) -> Option<Regex> {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!("Invalid {role} pattern '{pattern}', ignoring it: {e}");
                None
            }
        }
    }
}
