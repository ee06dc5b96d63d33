//! Command-line interface parsing for newsdesk
//!
//! The backend host comes from `--base-url` or the `NEWSDESK_BASE_URL`
//! environment variable. Cache and log locations default to the XDG cache
//! directory and can be overridden.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::cache::default_cache_dir;

/// Environment variable naming the backend host
pub const BASE_URL_ENV: &str = "NEWSDESK_BASE_URL";

/// File name of the log inside the cache directory
const LOG_FILE_NAME: &str = "newsdesk.log";

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// No backend URL was given on the command line or in the environment
    #[error("No backend URL configured. Pass --base-url or set NEWSDESK_BASE_URL")]
    MissingBaseUrl,

    /// The backend URL could not be parsed
    #[error("Invalid backend URL: '{0}'")]
    InvalidBaseUrl(String),

    /// No cache directory could be determined and none was given
    #[error("Could not determine a cache directory. Pass --cache-dir")]
    NoCacheDir,
}

/// newsdesk - the daily news digest in your terminal
#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(about = "Latest news headlines and audio summary")]
#[command(version)]
pub struct Cli {
    /// Base URL of the news backend; `/news` is appended
    #[arg(long, env = BASE_URL_ENV, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory holding the cached news (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Log file path (defaults to newsdesk.log in the cache directory)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the news as plain text instead of opening the terminal UI
    #[arg(long)]
    pub print: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// Directory for the news cache
    pub cache_dir: PathBuf,
    /// Path of the log file
    pub log_file: PathBuf,
    /// Plain-text mode
    pub print: bool,
}

/// Validates a backend URL and strips any trailing slash.
///
/// # Returns
/// * `Ok(String)` for an absolute http(s) URL
/// * `Err(CliError::InvalidBaseUrl)` otherwise
pub fn parse_base_url(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim();
    let url = Url::parse(trimmed).map_err(|_| CliError::InvalidBaseUrl(s.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::InvalidBaseUrl(s.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Self::resolve(cli, default_cache_dir())
    }

    /// Like `from_cli`, with the fallback cache directory supplied by the caller.
    pub fn resolve(cli: &Cli, fallback_cache_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let base_url = match cli.base_url.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_base_url(raw)?,
            _ => return Err(CliError::MissingBaseUrl),
        };

        let cache_dir = cli
            .cache_dir
            .clone()
            .or(fallback_cache_dir)
            .ok_or(CliError::NoCacheDir)?;

        let log_file = cli
            .log_file
            .clone()
            .unwrap_or_else(|| cache_dir.join(LOG_FILE_NAME));

        Ok(StartupConfig {
            base_url,
            cache_dir,
            log_file,
            print: cli.print,
        })
    }
}
