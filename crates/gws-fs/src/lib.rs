//! Filesystem layer for gitws
//!
//! Provides the safe-write primitives every mutating command relies on:
//! timestamped backups, write-to-temp-then-rename, and advisory locking.

pub mod backup;
pub mod config;
pub mod error;
pub mod io;
pub mod lock;
pub mod path;

pub use backup::create_backup;
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{MODE_EXECUTABLE, MODE_PRIVATE, MODE_PUBLIC, write_atomic};
pub use lock::FileLock;
pub use path::{NormalizedPath, validate_identifier};
