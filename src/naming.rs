//! Collision-free target naming.
//!
//! When a destination path is already taken, the organizer probes
//! `stem_1.suffix`, `stem_2.suffix`, ... until it finds a free name. The
//! probe is purely a function of the filesystem state, so repeated calls
//! without an intervening change return the same path.

use std::path::{Path, PathBuf};

/// Upper bound on rename probes before giving up on a target.
const MAX_RENAME_ATTEMPTS: u32 = 10_000;

/// Returns a path at which no file currently exists, derived from `target`.
///
/// If `target` itself is free it is returned unchanged. Otherwise numbered
/// candidates are probed in increasing order and the first free one wins.
/// Returns `None` when every candidate up to the attempt cap is taken; the
/// caller reports that as a per-file naming failure.
///
/// Multi-dot names keep everything up to the final extension
/// (`archive.tar.zip` becomes `archive.tar_1.zip`), and extension-less
/// names get a bare counter (`README` becomes `README_1`).
pub fn unique_path(target: &Path) -> Option<PathBuf> {
    if !target.exists() {
        return Some(target.to_path_buf());
    }

    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = target
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()));

    for counter in 1..=MAX_RENAME_ATTEMPTS {
        let name = match &suffix {
            Some(suffix) => format!("{stem}_{counter}{suffix}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return Some(candidate);
        }
    }

    None
}
