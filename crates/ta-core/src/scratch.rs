//! Per-invocation scratch space for staged CSV files.
//!
//! The directory is removed when the `ScratchDir` is dropped, including on
//! error paths.

use crate::error::CoreResult;
use crate::report::CsvTable;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A CSV file written into scratch space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn new() -> CoreResult<Self> {
        Ok(Self {
            dir: tempfile::Builder::new().prefix("tae-").tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `table` as `file_name` and return its path and size.
    ///
    /// Rows may differ in length from the header: operators configure header
    /// and schema separately and a mismatch must not fail the extract.
    pub fn write_csv(&self, file_name: &str, table: &CsvTable) -> CoreResult<StagedFile> {
        let path = self.dir.path().join(file_name);
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        writer.write_record(&table.header)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        let size = std::fs::metadata(&path)?.len();
        Ok(StagedFile { path, size })
    }

    /// Remove the directory now, surfacing any cleanup error.
    pub fn close(self) -> CoreResult<()> {
        self.dir.close()?;
        Ok(())
    }
}
