//! In-memory table of cell text and the synchronized store that concurrent
//! translation tasks write into.

use crate::error::RunError;
use std::sync::{Arc, Mutex, PoisonError};

/// Rows of cell text. Every row has the same number of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid, rejecting ragged rows.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self, RunError> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
                return Err(RunError::Input(format!(
                    "row {} has {} fields, expected {}",
                    index + 1,
                    row.len(),
                    width
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (all rows share it).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at 0-based coordinates.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn set(&mut self, row: usize, col: usize, value: String) -> Result<(), RunError> {
        let slot = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                RunError::Output(format!("cell ({}, {}) is outside the grid", row + 1, col + 1))
            })?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
impl From<Vec<Vec<&str>>> for Grid {
    /// Literal grids for tests. Panics on ragged rows.
    fn from(rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(str::to_string).collect())
            .collect();
        match Grid::new(rows) {
            Ok(grid) => grid,
            Err(e) => panic!("invalid grid literal: {}", e),
        }
    }
}

/// Shared handle to the grid under translation.
///
/// Writers hold the lock only for a single cell assignment. Tasks never
/// target the same coordinate, so the lock protects the container, not any
/// logical ordering between tasks.
#[derive(Debug, Clone)]
pub struct GridStore {
    inner: Arc<Mutex<Grid>>,
}

impl GridStore {
    pub fn new(grid: Grid) -> Self {
        Self {
            inner: Arc::new(Mutex::new(grid)),
        }
    }

    /// Write `value` at 0-based `(row, col)`.
    pub fn set_cell(&self, row: usize, col: usize, value: String) -> Result<(), RunError> {
        // A panicking writer cannot leave a half-written String behind, so a
        // poisoned lock still guards a consistent grid.
        let mut grid = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        grid.set(row, col, value)
    }

    /// Take the grid back once every writer has finished.
    ///
    /// Fails if another handle is still alive, which means a task outlived
    /// the run.
    pub fn into_grid(self) -> Result<Grid, RunError> {
        let mutex = Arc::try_unwrap(self.inner).map_err(|_| {
            RunError::TaskAborted("grid is still shared by an unfinished task".to_string())
        })?;
        Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}
