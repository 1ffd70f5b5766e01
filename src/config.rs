use crate::columns::ColumnSelection;
use crate::dispatch::RunOptions;
use crate::language::LanguageTag;
use crate::limiter::{DEFAULT_CONCURRENCY_CAP, MAX_CONCURRENCY_CAP};
use crate::retry::RetryConfig;
use crate::throttle::SubmissionThrottle;
use crate::translator::DEFAULT_API_URL;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Translation service
    pub api_key: String,
    pub api_url: String,
    pub request_timeout: Duration,

    // Files
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    // Languages
    pub source: LanguageTag,
    pub target: LanguageTag,

    // Selection
    pub columns: ColumnSelection,

    // Pacing
    pub concurrency_cap: usize,
    pub throttle_unit: Duration,
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `input_override` (usually the first CLI argument) takes precedence over
    /// `INPUT_PATH`.
    pub fn from_env(input_override: Option<PathBuf>) -> Result<Self> {
        // Output destination is checked first: nothing else matters without it
        let output_path = std::env::var("OUTPUT_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .context("OUTPUT_PATH not set")?;

        let input_path = match input_override {
            Some(path) => path,
            None => std::env::var("INPUT_PATH")
                .map(PathBuf::from)
                .context("INPUT_PATH not set and no input file given")?,
        };

        let source = LanguageTag::parse(
            &std::env::var("SOURCE_LANG").unwrap_or_else(|_| "en".to_string()),
        )
        .context("Invalid SOURCE_LANG")?;
        let target = LanguageTag::parse(
            &std::env::var("TARGET_LANG").context("TARGET_LANG not set")?,
        )
        .context("Invalid TARGET_LANG")?;

        let columns = match std::env::var("TRANSLATE_COLUMNS") {
            Ok(value) => ColumnSelection::from_str(&value).context("Invalid TRANSLATE_COLUMNS")?,
            Err(_) => ColumnSelection::All,
        };

        let concurrency_cap: usize = parse_var("CONCURRENCY_CAP", DEFAULT_CONCURRENCY_CAP)?;
        if concurrency_cap == 0 {
            bail!("CONCURRENCY_CAP must be at least 1");
        }
        if concurrency_cap > MAX_CONCURRENCY_CAP {
            bail!("CONCURRENCY_CAP must be at most {}", MAX_CONCURRENCY_CAP);
        }

        let max_attempts: u32 = parse_var("MAX_ATTEMPTS", 5)?;
        if max_attempts == 0 {
            bail!("MAX_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            api_key: std::env::var("TRANSLATE_API_KEY").unwrap_or_default(),
            api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 30)?),
            input_path,
            output_path,
            source,
            target,
            columns,
            concurrency_cap,
            throttle_unit: Duration::from_millis(parse_var("THROTTLE_MS_PER_CHAR", 1)?),
            max_attempts,
            backoff_unit: Duration::from_millis(parse_var("BACKOFF_MS", 250)?),
        })
    }

    /// Run context for the dispatcher.
    pub fn run_options(&self) -> RunOptions {
        RunOptions::new(self.source.clone(), self.target.clone())
            .with_columns(self.columns.clone())
            .with_concurrency_cap(self.concurrency_cap)
            .with_throttle(SubmissionThrottle::new(self.throttle_unit))
            .with_retry(RetryConfig::new(self.max_attempts, self.backoff_unit))
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", name, value, e)),
        Err(_) => Ok(default),
    }
}
