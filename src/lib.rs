//! Translate the cells of a CSV file through a rate-limited translation service.
//!
//! One task is dispatched per non-empty selected cell. Tasks are bounded by a
//! concurrency cap, paced by a size-proportional submission throttle, retried
//! with linear backoff, and merged back into a shared grid. A cell that
//! exhausts its retry budget aborts the whole run and nothing is written.

pub mod columns;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod language;
pub mod limiter;
pub mod pipeline;
pub mod retry;
pub mod table;
pub mod throttle;
pub mod tracker;
pub mod translator;

pub use columns::ColumnSelection;
pub use dispatch::{Dispatcher, RunOptions, RunSummary};
pub use error::RunError;
pub use grid::{Grid, GridStore};
pub use language::LanguageTag;
pub use pipeline::translate_file;
pub use translator::{GoogleTranslator, Translator};
