//! Reading and writing grids as comma-separated files.
//!
//! Every record is data: there is no header handling, so a header line is
//! translated like any other row when its column is selected.

use crate::error::RunError;
use crate::grid::Grid;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read the whole file into a [`Grid`].
///
/// Ragged records are an input error.
pub fn read_grid(path: &Path) -> Result<Grid, RunError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| RunError::Input(format!("cannot open {}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| RunError::Input(format!("{}: {}", path.display(), e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Grid::new(rows)
}

/// Write `grid` to `path`.
///
/// The data goes to a sibling temp file first and is renamed into place, so a
/// failure never leaves a truncated file at `path`.
pub fn write_grid(path: &Path, grid: &Grid) -> Result<(), RunError> {
    let temp_path = temp_path_for(path);

    let result = write_records(&temp_path, grid).and_then(|()| {
        std::fs::rename(&temp_path, path).map_err(|e| {
            RunError::Output(format!(
                "cannot move {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))
        })
    });

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

fn write_records(path: &Path, grid: &Grid) -> Result<(), RunError> {
    fn output_error(path: &Path, e: csv::Error) -> RunError {
        RunError::Output(format!("cannot write {}: {}", path.display(), e))
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| output_error(path, e))?;

    for row in grid.rows() {
        writer.write_record(row).map_err(|e| output_error(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| output_error(path, e.into()))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".partial");
    path.with_file_name(name)
}
