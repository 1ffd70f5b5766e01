//! Translate a CSV file.
//!
//! Usage:
//!   csv-translate [INPUT_FILE]
//!
//! Required environment variables:
//! - OUTPUT_PATH
//! - TARGET_LANG
//! - INPUT_PATH (unless INPUT_FILE is given)
//!
//! Optional:
//! - TRANSLATE_API_KEY
//! - TRANSLATE_API_URL
//! - REQUEST_TIMEOUT_SECS (defaults to 30)
//! - SOURCE_LANG (defaults to en)
//! - TRANSLATE_COLUMNS (defaults to all)
//! - CONCURRENCY_CAP (defaults to 100)
//! - THROTTLE_MS_PER_CHAR (defaults to 1)
//! - MAX_ATTEMPTS (defaults to 5)
//! - BACKOFF_MS (defaults to 250)

use anyhow::Result;
use csv_translate::config::Config;
use csv_translate::{translate_file, GoogleTranslator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("csv_translate=info".parse()?),
        )
        .init();

    let input_override = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::from_env(input_override)?;

    info!(
        "Translating {} ({} -> {}, columns: {})",
        config.input_path.display(),
        config.source,
        config.target,
        config.columns
    );

    let translator = Arc::new(GoogleTranslator::new(
        &config.api_url,
        &config.api_key,
        config.request_timeout,
    )?);

    let summary = translate_file(
        &config.input_path,
        &config.output_path,
        translator,
        config.run_options(),
    )
    .await?;

    info!(
        "Done: {} cells translated, {} empty cells skipped",
        summary.dispatched, summary.skipped_empty
    );
    Ok(())
}
