/// Undo engine: reverse replay of a persisted operation log.
///
/// Records are replayed newest-first, since later transfers may have
/// created directories or claimed names that earlier undos must not assume
/// are still in place. A `move` is undone by moving the file back; a `copy`
/// by deleting the copy (the source was never touched). A record whose
/// destination no longer exists is skipped without failing the run, and one
/// record's failure never stops the rest.
use crate::ledger::{LedgerError, OperationKind, OperationLog, OperationRecord};
use crate::output::OutputFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// What a replay run did (or, in dry-run mode, would do).
#[derive(Debug, Default)]
pub struct UndoReport {
    /// Operations undone (or reported as would-undo in dry-run mode).
    pub undone: usize,
    /// Records whose destination had already vanished, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
    /// Records whose undo failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl UndoReport {
    /// True when every record was either undone or legitimately skipped.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replays persisted operation logs in reverse.
pub struct UndoManager;

impl UndoManager {
    /// Undoes the operations recorded in the log at `log_path`.
    ///
    /// Fails up front with [`LedgerError::NotFound`] or
    /// [`LedgerError::Corrupt`] when the log is missing or unreadable; in
    /// that case nothing has been replayed. Otherwise per-record failures
    /// are collected in the report and the run continues.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use declutter::undo::UndoManager;
    /// use std::path::Path;
    ///
    /// let report = UndoManager::undo(Path::new("operations.json"), false)?;
    /// println!("Undone {} operations", report.undone);
    /// # Ok::<(), declutter::ledger::LedgerError>(())
    /// ```
    pub fn undo(log_path: &Path, dry_run: bool) -> Result<UndoReport, LedgerError> {
        let log = OperationLog::load(log_path)?;
        log::info!(
            "Replaying {} operations from {} in reverse",
            log.len(),
            log_path.display()
        );

        let mut report = UndoReport::default();

        for record in log.operations.iter().rev() {
            if !record.destination.exists() {
                report.skipped.push((
                    record.destination.clone(),
                    "destination no longer exists".to_string(),
                ));
                continue;
            }

            if dry_run {
                OutputFormatter::dry_run_notice(&format!(
                    "Would undo: {} -> {}",
                    record.destination.display(),
                    record.source.display()
                ));
                report.undone += 1;
                continue;
            }

            let outcome = match record.operation {
                OperationKind::Move => Self::restore_move(record),
                OperationKind::Copy => Self::remove_copy(record),
            };

            match outcome {
                Ok(()) => report.undone += 1,
                Err(reason) => {
                    log::error!("Error undoing {}: {}", record.destination.display(), reason);
                    report.failed.push((record.destination.clone(), reason));
                }
            }
        }

        Ok(report)
    }

    /// Moves a relocated file back to its original path, recreating the
    /// source's parent directory if it is gone.
    fn restore_move(record: &OperationRecord) -> Result<(), String> {
        if let Some(parent) = record.source.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| format!("could not recreate {}: {}", parent.display(), e))?;
        }

        fs::rename(&record.destination, &record.source)
            .map_err(|e| format!("failed to restore file: {}", e))?;

        OutputFormatter::success(&format!(
            "Restored {} -> {}",
            record.destination.display(),
            record.source.display()
        ));
        Ok(())
    }

    /// Deletes the duplicate a copy operation created.
    fn remove_copy(record: &OperationRecord) -> Result<(), String> {
        fs::remove_file(&record.destination)
            .map_err(|e| format!("failed to remove copy: {}", e))?;

        OutputFormatter::success(&format!("Removed copy: {}", record.destination.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::OperationRecord;
    use tempfile::TempDir;

    fn record(kind: OperationKind, source: PathBuf, destination: PathBuf) -> OperationRecord {
        OperationRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            operation: kind,
            source,
            destination,
            category: "Documents".to_string(),
        }
    }

    fn saved_log(path: &Path, records: Vec<OperationRecord>) {
        let mut log = OperationLog::new();
        for r in records {
            log.append(r);
        }
        log.save(path).expect("Failed to save log");
    }

    #[test]
    fn test_undo_missing_log_aborts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = UndoManager::undo(&temp_dir.path().join("missing.json"), false);
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn test_undo_corrupt_log_aborts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("operations.json");
        fs::write(&log_path, "{}").expect("Failed to write file");

        let result = UndoManager::undo(&log_path, false);
        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }

    #[test]
    fn test_undo_move_restores_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let original = temp_dir.path().join("notes.txt");
        let moved = temp_dir.path().join("Documents").join("notes.txt");
        fs::create_dir_all(moved.parent().unwrap()).expect("Failed to create dir");
        fs::write(&moved, "content").expect("Failed to write file");

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![record(OperationKind::Move, original.clone(), moved.clone())],
        );

        let report = UndoManager::undo(&log_path, false).expect("Undo failed");

        assert_eq!(report.undone, 1);
        assert!(report.is_complete_success());
        assert!(original.exists());
        assert!(!moved.exists());
    }

    #[test]
    fn test_undo_move_recreates_source_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let original = temp_dir.path().join("nested").join("deep").join("notes.txt");
        let moved = temp_dir.path().join("Documents").join("notes.txt");
        fs::create_dir_all(moved.parent().unwrap()).expect("Failed to create dir");
        fs::write(&moved, "content").expect("Failed to write file");

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![record(OperationKind::Move, original.clone(), moved)],
        );

        let report = UndoManager::undo(&log_path, false).expect("Undo failed");
        assert_eq!(report.undone, 1);
        assert!(original.exists());
    }

    #[test]
    fn test_undo_copy_removes_duplicate_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let original = temp_dir.path().join("photo.jpg");
        let copied = temp_dir.path().join("Images").join("photo.jpg");
        fs::write(&original, "image").expect("Failed to write file");
        fs::create_dir_all(copied.parent().unwrap()).expect("Failed to create dir");
        fs::write(&copied, "image").expect("Failed to write file");

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![record(OperationKind::Copy, original.clone(), copied.clone())],
        );

        let report = UndoManager::undo(&log_path, false).expect("Undo failed");

        assert_eq!(report.undone, 1);
        assert!(original.exists(), "Copy undo must not touch the source");
        assert!(!copied.exists());
    }

    #[test]
    fn test_undo_skips_vanished_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let original = temp_dir.path().join("notes.txt");
        let moved = temp_dir.path().join("Documents").join("notes.txt");
        // The destination was never created, as if the user already moved it.

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![record(OperationKind::Move, original, moved)],
        );

        let report = UndoManager::undo(&log_path, false).expect("Undo failed");

        assert_eq!(report.undone, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.is_complete_success());
    }

    #[test]
    fn test_undo_replays_in_reverse_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Two moves of the same original name: a.txt went first, then the
        // colliding a.txt became a_1.txt. Reverse replay must restore a_1
        // before a so both land back where they started.
        let first_src = temp_dir.path().join("one").join("a.txt");
        let second_src = temp_dir.path().join("two").join("a.txt");
        let first_dst = temp_dir.path().join("Documents").join("a.txt");
        let second_dst = temp_dir.path().join("Documents").join("a_1.txt");
        fs::create_dir_all(temp_dir.path().join("Documents")).expect("Failed to create dir");
        fs::write(&first_dst, "first").expect("Failed to write file");
        fs::write(&second_dst, "second").expect("Failed to write file");

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![
                record(OperationKind::Move, first_src.clone(), first_dst),
                record(OperationKind::Move, second_src.clone(), second_dst),
            ],
        );

        let report = UndoManager::undo(&log_path, false).expect("Undo failed");

        assert_eq!(report.undone, 2);
        assert_eq!(
            fs::read_to_string(&first_src).expect("Failed to read file"),
            "first"
        );
        assert_eq!(
            fs::read_to_string(&second_src).expect("Failed to read file"),
            "second"
        );
    }

    #[test]
    fn test_undo_dry_run_mutates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let original = temp_dir.path().join("photo.jpg");
        let copied = temp_dir.path().join("Images").join("photo.jpg");
        fs::write(&original, "image").expect("Failed to write file");
        fs::create_dir_all(copied.parent().unwrap()).expect("Failed to create dir");
        fs::write(&copied, "image").expect("Failed to write file");

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![record(OperationKind::Copy, original.clone(), copied.clone())],
        );

        let report = UndoManager::undo(&log_path, true).expect("Undo failed");

        assert_eq!(report.undone, 1, "Dry run counts what it would undo");
        assert!(copied.exists(), "Dry run must not delete anything");
        assert!(original.exists());
    }

    #[test]
    fn test_undo_per_record_isolation() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // One restorable move and one whose destination is a non-empty
        // directory path, which remove/rename will refuse.
        let good_src = temp_dir.path().join("good.txt");
        let good_dst = temp_dir.path().join("Documents").join("good.txt");
        fs::create_dir_all(good_dst.parent().unwrap()).expect("Failed to create dir");
        fs::write(&good_dst, "good").expect("Failed to write file");

        let bad_dst = temp_dir.path().join("Documents").join("blocked");
        fs::create_dir_all(bad_dst.join("child")).expect("Failed to create dir");
        let bad_src = temp_dir.path().join("blocked");

        let log_path = temp_dir.path().join("operations.json");
        saved_log(
            &log_path,
            vec![
                record(OperationKind::Copy, bad_src, bad_dst),
                record(OperationKind::Move, good_src.clone(), good_dst),
            ],
        );

        let report = UndoManager::undo(&log_path, false).expect("Undo failed");

        assert_eq!(report.undone, 1, "Good record still undone");
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_complete_success());
        assert!(good_src.exists());
    }
}
