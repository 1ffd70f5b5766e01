use crate::dispatch::{Dispatcher, RunOptions, RunSummary};
use crate::error::RunError;
use crate::table::{read_grid, write_grid};
use crate::translator::Translator;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Read `input`, translate it, and write the result to `output`.
///
/// The output file is only touched after every cell has been translated; a
/// failed run leaves whatever was at `output` before.
pub async fn translate_file<T: Translator>(
    input: &Path,
    output: &Path,
    translator: Arc<T>,
    options: RunOptions,
) -> Result<RunSummary, RunError> {
    let grid = read_grid(input)?;
    info!(
        "Loaded {} ({} rows x {} columns)",
        input.display(),
        grid.row_count(),
        grid.column_count()
    );

    let dispatcher = Dispatcher::new(translator, options);
    let (grid, summary) = dispatcher.run(grid).await?;

    write_grid(output, &grid)?;
    info!(
        "Wrote {} ({} cells translated)",
        output.display(),
        summary.dispatched
    );

    Ok(summary)
}
