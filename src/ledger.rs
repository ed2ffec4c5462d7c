/// Durable record of executed transfer operations.
///
/// Every non-dry-run transfer appends one [`OperationRecord`] to the run's
/// [`OperationLog`]. The log is held in memory while the run is live and
/// persisted to JSON on demand; a later undo run reads that file back and
/// replays it in reverse. The persisted form is the only handoff between
/// the two runs.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The kind of filesystem operation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Move,
    Copy,
}

impl OperationKind {
    /// Infinitive verb, used in dry-run notices.
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Move => "move",
            OperationKind::Copy => "copy",
        }
    }

    /// Past-tense verb, used in transfer reports.
    pub fn past_tense(&self) -> &'static str {
        match self {
            OperationKind::Move => "Moved",
            OperationKind::Copy => "Copied",
        }
    }
}

/// One executed transfer: where a file was, where it ended up, and when.
///
/// A record is created only after its filesystem operation fully succeeded,
/// so the destination always exists at recording time (and for a move, the
/// source no longer does).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub timestamp: String,
    pub operation: OperationKind,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub category: String,
}

/// Session metadata stored alongside the records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub timestamp: String,
    pub total_operations: usize,
}

/// Append-only sequence of operations for a single organize run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLog {
    pub session_info: SessionInfo,
    pub operations: Vec<OperationRecord>,
}

impl OperationLog {
    /// Creates an empty log stamped with the current time.
    pub fn new() -> Self {
        Self {
            session_info: SessionInfo {
                timestamp: chrono::Utc::now().to_rfc3339(),
                total_operations: 0,
            },
            operations: Vec::new(),
        }
    }

    /// Appends a record, keeping the session count in step.
    pub fn append(&mut self, record: OperationRecord) {
        self.operations.push(record);
        self.session_info.total_operations = self.operations.len();
    }

    /// True if no operations were recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Writes the log to `path` as pretty-printed JSON.
    ///
    /// An empty log is not worth keeping: the call returns `Ok` without
    /// touching the filesystem. Otherwise the write is all-or-nothing —
    /// either the full document lands on disk or the call fails with
    /// [`LedgerError::WriteFailed`].
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        if self.operations.is_empty() {
            log::debug!("Operation log is empty, skipping save to {}", path.display());
            return Ok(());
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| LedgerError::WriteFailed {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
        })?;

        fs::write(path, json).map_err(|e| LedgerError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Reads a previously saved log back from `path`.
    ///
    /// A missing file is [`LedgerError::NotFound`]; a file that is not
    /// valid JSON, or is valid JSON missing any required field, is
    /// [`LedgerError::Corrupt`].
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        if !path.exists() {
            return Err(LedgerError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| LedgerError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| LedgerError::Corrupt {
            reason: e.to_string(),
        })
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while persisting or reading an operation log.
#[derive(Debug)]
pub enum LedgerError {
    /// No log file at the given path.
    NotFound(PathBuf),
    /// The log file exists but could not be read.
    ReadFailed { path: PathBuf, source: std::io::Error },
    /// The log file is not a parseable, structurally valid log.
    Corrupt { reason: String },
    /// The log could not be written out.
    WriteFailed { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Operation log not found: {}", path.display())
            }
            Self::ReadFailed { path, source } => {
                write!(f, "Failed to read operation log {}: {}", path.display(), source)
            }
            Self::Corrupt { reason } => {
                write!(f, "Invalid operation log format: {}", reason)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "Failed to write operation log {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record(kind: OperationKind) -> OperationRecord {
        OperationRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            operation: kind,
            source: PathBuf::from("/tmp/source/photo.jpg"),
            destination: PathBuf::from("/tmp/organized/Images/photo.jpg"),
            category: "Images".to_string(),
        }
    }

    #[test]
    fn test_append_tracks_count() {
        let mut log = OperationLog::new();
        assert!(log.is_empty());

        log.append(sample_record(OperationKind::Move));
        log.append(sample_record(OperationKind::Copy));

        assert_eq!(log.len(), 2);
        assert_eq!(log.session_info.total_operations, 2);
    }

    #[test]
    fn test_save_empty_log_is_a_no_op() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("operations.json");

        let log = OperationLog::new();
        log.save(&path).expect("Empty save should succeed");

        assert!(!path.exists(), "Empty log should not create a file");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("operations.json");

        let mut log = OperationLog::new();
        log.append(sample_record(OperationKind::Move));
        log.append(sample_record(OperationKind::Copy));
        log.save(&path).expect("Failed to save log");

        let loaded = OperationLog::load(&path).expect("Failed to load log");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.session_info.total_operations, 2);
        assert_eq!(loaded.operations[0].operation, OperationKind::Move);
        assert_eq!(loaded.operations[1].operation, OperationKind::Copy);
        assert_eq!(loaded.operations[0].category, "Images");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = OperationLog::load(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_json_is_corrupt() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("operations.json");
        fs::write(&path, "not json at all").expect("Failed to write file");

        let result = OperationLog::load(&path);
        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }

    #[test]
    fn test_load_missing_field_is_corrupt() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("operations.json");
        // A record without a "destination" field.
        let json = r#"{
            "session_info": { "timestamp": "2024-01-01T00:00:00Z", "total_operations": 1 },
            "operations": [
                { "timestamp": "2024-01-01T00:00:00Z", "operation": "move",
                  "source": "/tmp/a.txt", "category": "Documents" }
            ]
        }"#;
        fs::write(&path, json).expect("Failed to write file");

        let result = OperationLog::load(&path);
        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }

    #[test]
    fn test_load_unknown_operation_kind_is_corrupt() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("operations.json");
        let json = r#"{
            "session_info": { "timestamp": "2024-01-01T00:00:00Z", "total_operations": 1 },
            "operations": [
                { "timestamp": "2024-01-01T00:00:00Z", "operation": "rename",
                  "source": "/tmp/a.txt", "destination": "/tmp/b.txt", "category": "Documents" }
            ]
        }"#;
        fs::write(&path, json).expect("Failed to write file");

        let result = OperationLog::load(&path);
        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }
}
