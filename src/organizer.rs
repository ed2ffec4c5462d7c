/// The file transfer engine.
///
/// This module orchestrates one organize run: it validates the source
/// directory, snapshots the candidate set, and then, per file, applies the
/// filter, resolves the category, picks a collision-free target, performs
/// the move or copy, and records the operation for undo. Any error while
/// processing a single candidate is captured and reported without aborting
/// the rest of the batch.
use crate::category::CategoryTable;
use crate::filter::FileFilter;
use crate::ledger::{OperationKind, OperationLog, OperationRecord};
use crate::naming;
use crate::output::OutputFormatter;
use colored::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options for one organize run, with their defaults.
///
/// Every recognized knob is an explicit field; pattern and size options are
/// handed to the [`FileFilter`] unchanged.
#[derive(Debug, Clone, Default)]
pub struct OrganizeOptions {
    /// Report intended actions without mutating anything.
    pub dry_run: bool,
    /// Enumerate the whole source tree instead of its immediate children.
    pub recursive: bool,
    /// Duplicate files instead of relocating them.
    pub copy: bool,
    /// Only process files whose name matches this regex.
    pub pattern: Option<String>,
    /// Skip files whose name matches this regex.
    pub exclude: Option<String>,
    /// Minimum file size in bytes, inclusive.
    pub min_size: Option<u64>,
    /// Maximum file size in bytes, inclusive.
    pub max_size: Option<u64>,
}

/// Errors that abort a run before any file is touched.
#[derive(Debug)]
pub enum OrganizeError {
    /// The source directory does not exist.
    SourceNotFound(PathBuf),
    /// The source path exists but is not a directory.
    SourceNotADirectory(PathBuf),
    /// The source directory could not be enumerated.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceNotFound(path) => {
                write!(f, "Source directory '{}' does not exist", path.display())
            }
            Self::SourceNotADirectory(path) => {
                write!(f, "Source '{}' is not a directory", path.display())
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// A failure confined to one candidate file.
///
/// These are collected in the [`RunReport`] and logged; they never stop the
/// run.
#[derive(Debug)]
pub enum PerFileError {
    /// Collision probing ran out of attempts for this target.
    NamingExhausted { target: PathBuf },
    /// The category subdirectory could not be created.
    CreateDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The move or copy itself failed.
    TransferFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for PerFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NamingExhausted { target } => {
                write!(
                    f,
                    "Exhausted rename attempts without finding a free name for {}",
                    target.display()
                )
            }
            Self::CreateDirFailed { path, source } => {
                write!(f, "Failed to create directory {}: {}", path.display(), source)
            }
            Self::TransferFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to transfer {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for PerFileError {}

/// A file discovered during candidate enumeration.
///
/// Size is captured at discovery time; when the metadata read fails the
/// size is unknown and the size filters pass it through.
#[derive(Debug, Clone)]
struct CandidateFile {
    path: PathBuf,
    file_name: String,
    extension: String,
    size: Option<u64>,
}

impl CandidateFile {
    fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = fs::metadata(&path).ok().map(|m| m.len());
        Self {
            path,
            file_name,
            extension,
            size,
        }
    }
}

/// Outcome of one organize run.
///
/// `files_processed` counts candidates that passed filtering (attempted);
/// `files_moved` counts only transfers that completed and were recorded.
/// The operation log carries one record per completed transfer and is what
/// `--save-log` persists.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files_processed: usize,
    pub files_moved: usize,
    pub category_counts: HashMap<String, usize>,
    pub failures: Vec<(PathBuf, PerFileError)>,
    pub log: OperationLog,
}

/// Organizes files from a source directory into category subdirectories of
/// a destination directory.
///
/// # Examples
///
/// ```no_run
/// use declutter::category::CategoryTable;
/// use declutter::organizer::{Organizer, OrganizeOptions};
/// use std::path::Path;
///
/// let organizer = Organizer::new(CategoryTable::default(), OrganizeOptions::default());
/// let report = organizer.run(Path::new("/downloads"), Path::new("/downloads/organized"))?;
/// println!("{} of {} files moved", report.files_moved, report.files_processed);
/// # Ok::<(), declutter::organizer::OrganizeError>(())
/// ```
pub struct Organizer {
    table: CategoryTable,
    filter: FileFilter,
    options: OrganizeOptions,
}

impl Organizer {
    /// Builds an organizer, compiling the filter patterns once.
    pub fn new(table: CategoryTable, options: OrganizeOptions) -> Self {
        let filter = FileFilter::new(
            options.pattern.as_deref(),
            options.exclude.as_deref(),
            options.min_size,
            options.max_size,
        );
        Self {
            table,
            filter,
            options,
        }
    }

    /// Runs the organize loop over `source`, placing files under `dest`.
    ///
    /// The source directory must exist and be a directory; either violation
    /// aborts before anything is touched. The candidate set is fixed before
    /// the first mutation, so files this run creates are never reconsidered.
    /// Per-file failures are collected in the report and do not stop the
    /// batch.
    pub fn run(&self, source: &Path, dest: &Path) -> Result<RunReport, OrganizeError> {
        if !source.exists() {
            return Err(OrganizeError::SourceNotFound(source.to_path_buf()));
        }
        if !source.is_dir() {
            return Err(OrganizeError::SourceNotADirectory(source.to_path_buf()));
        }

        let candidates = self.collect_candidates(source)?;
        log::info!("Found {} files to process", candidates.len());

        let mut report = RunReport::default();
        let progress = (!self.options.dry_run && !candidates.is_empty())
            .then(|| OutputFormatter::create_progress_bar(candidates.len() as u64));

        for candidate in &candidates {
            if !self.filter.passes(&candidate.file_name, candidate.size) {
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                continue;
            }
            report.files_processed += 1;

            let category = self.table.resolve(&candidate.extension).to_string();
            let kind = if self.options.copy {
                OperationKind::Copy
            } else {
                OperationKind::Move
            };
            let category_dir = dest.join(&category);
            let target = category_dir.join(&candidate.file_name);

            let outcome = match naming::unique_path(&target) {
                None => Err(PerFileError::NamingExhausted { target }),
                Some(target) if self.options.dry_run => {
                    OutputFormatter::dry_run_notice(&format!(
                        "Would {}: {} -> {}",
                        kind.verb(),
                        candidate.path.display(),
                        target.display()
                    ));
                    *report.category_counts.entry(category.clone()).or_insert(0) += 1;
                    continue;
                }
                Some(target) => self.execute(candidate, &category_dir, &target, kind).map(|_| target),
            };

            match outcome {
                Ok(destination) => {
                    report.log.append(OperationRecord {
                        timestamp: chrono::Utc::now().to_rfc3339(),
                        operation: kind,
                        source: candidate.path.clone(),
                        destination,
                        category: category.clone(),
                    });
                    report.files_moved += 1;
                    *report.category_counts.entry(category.clone()).or_insert(0) += 1;
                    if let Some(pb) = &progress {
                        pb.println(format!(
                            "{} {} {} to {}/",
                            "✓".green(),
                            kind.past_tense(),
                            candidate.file_name,
                            category
                        ));
                    }
                }
                Err(e) => {
                    log::error!("Error processing {}: {}", candidate.path.display(), e);
                    if let Some(pb) = &progress {
                        pb.println(format!("{} {}: {}", "✗".red(), candidate.path.display(), e));
                    }
                    report.failures.push((candidate.path.clone(), e));
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(report)
    }

    /// Enumerates candidate files before any mutation begins.
    fn collect_candidates(&self, source: &Path) -> Result<Vec<CandidateFile>, OrganizeError> {
        let mut candidates = Vec::new();

        if self.options.recursive {
            for entry in WalkDir::new(source) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        candidates.push(CandidateFile::from_path(entry.into_path()));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("Skipping unreadable entry under {}: {}", source.display(), e);
                    }
                }
            }
        } else {
            let entries = fs::read_dir(source).map_err(|e| OrganizeError::ReadDirFailed {
                path: source.to_path_buf(),
                source: e,
            })?;
            for entry in entries {
                match entry {
                    Ok(entry) => {
                        let path = entry.path();
                        if path.is_file() {
                            candidates.push(CandidateFile::from_path(path));
                        }
                    }
                    Err(e) => {
                        log::warn!("Skipping unreadable entry under {}: {}", source.display(), e);
                    }
                }
            }
        }

        Ok(candidates)
    }

    /// Creates the category directory and performs the filesystem operation.
    fn execute(
        &self,
        candidate: &CandidateFile,
        category_dir: &Path,
        target: &Path,
        kind: OperationKind,
    ) -> Result<(), PerFileError> {
        fs::create_dir_all(category_dir).map_err(|e| PerFileError::CreateDirFailed {
            path: category_dir.to_path_buf(),
            source: e,
        })?;

        match kind {
            OperationKind::Move => {
                fs::rename(&candidate.path, target).map_err(|e| PerFileError::TransferFailed {
                    from: candidate.path.clone(),
                    to: target.to_path_buf(),
                    source: e,
                })?;
            }
            OperationKind::Copy => {
                fs::copy(&candidate.path, target).map_err(|e| PerFileError::TransferFailed {
                    from: candidate.path.clone(),
                    to: target.to_path_buf(),
                    source: e,
                })?;
            }
        }

        Ok(())
    }
}
