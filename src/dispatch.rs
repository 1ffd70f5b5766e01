//! Fan-out of one translation task per non-empty selected cell.
//!
//! Submission is column-major (columns ascending, rows ascending within a
//! column). Each submission first takes a [`ConcurrencyLimiter`] slot, then the
//! [`SubmissionThrottle`] pauses in proportion to the cell's length. Tasks
//! translate through the retry policy, give their slot back, and write the
//! result into the shared [`GridStore`]. The grid is handed back only when every
//! task succeeded; the first exhausted task aborts the others.

use crate::columns::ColumnSelection;
use crate::error::RunError;
use crate::grid::{Grid, GridStore};
use crate::language::LanguageTag;
use crate::limiter::{
    ConcurrencyLimiter, LimiterToken, DEFAULT_CONCURRENCY_CAP, MAX_CONCURRENCY_CAP,
};
use crate::retry::{with_retry, RetryConfig};
use crate::throttle::SubmissionThrottle;
use crate::tracker::CompletionTracker;
use crate::translator::{translate_one, Translator};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Everything a run needs besides the grid and the translator.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source: LanguageTag,
    pub target: LanguageTag,
    pub columns: ColumnSelection,
    pub concurrency_cap: usize,
    pub throttle: SubmissionThrottle,
    pub retry: RetryConfig,
}

impl RunOptions {
    /// Options with default pacing: all columns, 100 concurrent calls,
    /// 1ms per character, 5 attempts with 250ms linear backoff.
    pub fn new(source: LanguageTag, target: LanguageTag) -> Self {
        Self {
            source,
            target,
            columns: ColumnSelection::All,
            concurrency_cap: DEFAULT_CONCURRENCY_CAP,
            throttle: SubmissionThrottle::default(),
            retry: RetryConfig::cell_translation(),
        }
    }

    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_concurrency_cap(mut self, cap: usize) -> Self {
        self.concurrency_cap = cap;
        self
    }

    pub fn with_throttle(mut self, throttle: SubmissionThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// One unit of work: a single non-empty cell. Coordinates are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTask {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Resolved 1-based columns
    pub columns: Vec<usize>,
    /// Cells sent for translation
    pub dispatched: usize,
    /// Selected cells left alone because they were empty
    pub skipped_empty: usize,
}

/// Select the cells to translate, in submission order.
///
/// `columns` are 1-based and must already be validated against the grid.
/// Returns the tasks and the number of empty cells skipped.
pub fn plan_tasks(grid: &Grid, columns: &[usize]) -> (Vec<CellTask>, usize) {
    let mut tasks = Vec::new();
    let mut skipped = 0;

    for &column in columns {
        let col = column - 1;
        for (row, cells) in grid.rows().iter().enumerate() {
            match cells.get(col) {
                Some(text) if !text.is_empty() => tasks.push(CellTask {
                    row,
                    column: col,
                    text: text.clone(),
                }),
                _ => skipped += 1,
            }
        }
    }

    (tasks, skipped)
}

/// Shared, read-only state for every task of a run.
struct TaskContext<T> {
    translator: Arc<T>,
    source: LanguageTag,
    target: LanguageTag,
    retry: RetryConfig,
}

/// Drives a translation run over a single grid.
pub struct Dispatcher<T: Translator> {
    translator: Arc<T>,
    options: RunOptions,
}

impl<T: Translator> Dispatcher<T> {
    pub fn new(translator: Arc<T>, options: RunOptions) -> Self {
        Self {
            translator,
            options,
        }
    }

    /// Translate every non-empty selected cell of `grid`.
    ///
    /// Returns the fully translated grid, or the first fatal error. No partial
    /// grid is ever returned.
    pub async fn run(&self, grid: Grid) -> Result<(Grid, RunSummary), RunError> {
        if self.options.concurrency_cap == 0 {
            return Err(RunError::Config(
                "concurrency cap must be at least 1".to_string(),
            ));
        }
        if self.options.concurrency_cap > MAX_CONCURRENCY_CAP {
            return Err(RunError::Config(format!(
                "concurrency cap must be at most {}",
                MAX_CONCURRENCY_CAP
            )));
        }
        if self.options.retry.max_attempts == 0 {
            return Err(RunError::Config(
                "retry budget must be at least 1 attempt".to_string(),
            ));
        }

        let columns = self.options.columns.resolve(grid.column_count())?;
        let (tasks, skipped_empty) = plan_tasks(&grid, &columns);
        let summary = RunSummary {
            columns,
            dispatched: tasks.len(),
            skipped_empty,
        };

        info!(
            "Translating {} cells from {} to {} (columns: {:?}, {} empty skipped)",
            summary.dispatched,
            self.options.source,
            self.options.target,
            summary.columns,
            summary.skipped_empty
        );

        let store = GridStore::new(grid);
        self.dispatch(tasks, &store).await.inspect_err(|e| {
            error!("Translation run aborted: {}", e);
        })?;

        let grid = store.into_grid()?;
        info!("Translated {} cells", summary.dispatched);
        Ok((grid, summary))
    }

    async fn dispatch(&self, tasks: Vec<CellTask>, store: &GridStore) -> Result<(), RunError> {
        let limiter = ConcurrencyLimiter::new(self.options.concurrency_cap);
        let throttle = self.options.throttle;
        let context = Arc::new(TaskContext {
            translator: Arc::clone(&self.translator),
            source: self.options.source.clone(),
            target: self.options.target.clone(),
            retry: self.options.retry.clone(),
        });
        let mut tracker = CompletionTracker::new();

        for task in tasks {
            let token = limiter
                .acquire()
                .await
                .map_err(|_| RunError::TaskAborted("concurrency limiter closed".to_string()))?;

            // Stop submitting as soon as any task has failed for good
            if let Err(e) = tracker.poll_failure() {
                drop(token);
                tracker.abort_all().await;
                return Err(e);
            }

            debug!(
                "Submitting cell ({}, {}), {} in flight",
                task.row + 1,
                task.column + 1,
                limiter.in_use()
            );
            tracker.spawn(run_cell_task(
                Arc::clone(&context),
                store.clone(),
                token,
                task.clone(),
            ));
            throttle.pause(&task.text).await;
        }

        tracker.wait_all().await
    }
}

/// Translate one cell with retries and store the result.
///
/// The limiter slot is held across all attempts and released before the grid
/// is locked.
async fn run_cell_task<T: Translator>(
    context: Arc<TaskContext<T>>,
    store: GridStore,
    token: LimiterToken,
    task: CellTask,
) -> Result<(), RunError> {
    let operation = format!("Translate cell ({}, {})", task.row + 1, task.column + 1);

    let result = with_retry(&context.retry, &operation, || {
        let context = Arc::clone(&context);
        let text = task.text.clone();
        async move {
            translate_one(
                context.translator.as_ref(),
                &text,
                &context.source,
                &context.target,
            )
            .await
        }
    })
    .await;
    drop(token);

    let translated = result.map_err(|source| RunError::TranslationExhausted {
        row: task.row + 1,
        column: task.column + 1,
        attempts: context.retry.max_attempts,
        source,
    })?;

    store.set_cell(task.row, task.column, translated)
}
