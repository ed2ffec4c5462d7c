//! declutter - organize files into category subdirectories by extension
//!
//! This library classifies files by extension, relocates (or copies) them
//! into categorized subdirectories of a destination directory, and records
//! every operation in a JSON log that a later run can replay in reverse to
//! restore the original layout. Filtering by name pattern and size, a
//! dry-run preview mode, and deterministic collision-free renaming are
//! built in.

pub mod category;
pub mod cli;
pub mod config;
pub mod filter;
pub mod ledger;
pub mod logging;
pub mod naming;
pub mod organizer;
pub mod output;
pub mod undo;

pub use category::{CategoryTable, FALLBACK_CATEGORY};
pub use config::{ConfigError, load_category_table};
pub use filter::FileFilter;
pub use ledger::{LedgerError, OperationKind, OperationLog, OperationRecord};
pub use organizer::{OrganizeError, OrganizeOptions, Organizer, PerFileError, RunReport};
pub use undo::{UndoManager, UndoReport};

pub use cli::{Cli, run as run_cli};
