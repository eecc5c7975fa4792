//! # Data Files
//!
//! The till's persistent store: pretty-printed JSON arrays, loaded per
//! command.
//!
//! ```text
//! <data dir>/
//! ├── sales.json       ◄─── SaleLedger, newest first
//! ├── bookings.json    ◄─── BookingBook
//! └── customers.json   ◄─── CustomerDirectory
//! ```
//!
//! ## Platform-Specific Paths
//! - **macOS**: `~/Library/Application Support/com.parpu.pos/sales.json`
//! - **Windows**: `%APPDATA%\parpu\pos\data\sales.json`
//! - **Linux**: `~/.local/share/pos/sales.json`
//!
//! ## Override
//! `--sales <PATH>` or the `PARPU_SALES_PATH` environment variable. Bookings
//! and customers always live next to the sales file.

use std::path::{Path, PathBuf};

use parpu_core::{Sale, SaleLedger};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

// =============================================================================
// JSON Record File
// =============================================================================

/// A pretty-printed JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record. A missing file is an empty list.
    pub fn read<T: DeserializeOwned>(&self) -> CliResult<Vec<T>> {
        if !self.path.exists() {
            debug!(path = ?self.path, "Data file not found, starting empty");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let records: Vec<T> = serde_json::from_str(&contents)?;
        debug!(path = ?self.path, count = records.len(), "Records loaded");

        Ok(records)
    }

    /// Writes through a sibling temp file so a crash mid-write leaves the
    /// previous file intact.
    pub fn write<T: Serialize>(&self, records: &[T]) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;

        info!(path = ?self.path, count = records.len(), "Records saved");
        Ok(())
    }
}

// =============================================================================
// Sales File
// =============================================================================

#[derive(Debug, Clone)]
pub struct SalesFile {
    file: JsonFile,
}

impl SalesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SalesFile {
            file: JsonFile::new(path),
        }
    }

    /// Resolves the location: explicit path, then env, then the data dir.
    pub fn resolve(path: Option<PathBuf>) -> CliResult<Self> {
        path.or_else(|| std::env::var_os("PARPU_SALES_PATH").map(PathBuf::from))
            .or_else(Self::default_path)
            .map(Self::new)
            .ok_or(CliError::NoDefaultPath("sales file"))
    }

    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "parpu", "pos")
            .map(|dirs| dirs.data_dir().join("sales.json"))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Another data file in the same directory, e.g. `bookings.json`.
    pub fn sibling(&self, file_name: &str) -> JsonFile {
        JsonFile::new(self.path().with_file_name(file_name))
    }

    /// Reads the ledger. A missing file is an empty ledger.
    pub fn load(&self) -> CliResult<SaleLedger> {
        let sales: Vec<Sale> = self.file.read()?;
        Ok(SaleLedger::from_sales(sales))
    }

    pub fn save(&self, ledger: &SaleLedger) -> CliResult<()> {
        self.file.write(ledger.list())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
