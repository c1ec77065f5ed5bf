//! Juice WRLD Discography API Client Library
//!
//! This library provides an async client for the Juice WRLD discography REST API:
//! typed access to artists, albums, songs and eras, free-text search, remote file
//! browsing and downloads, server-side zip archive jobs, and resolution of a song
//! to a streamable URL. A companion command-line interface is built on top of it.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `client` - HTTP client and all endpoint operations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every operation
//! - `logging` - Tracing subscriber setup for binaries
//! - `storage` - Atomic file writes for downloads
//! - `time` - Lenient timestamp parsing
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use juicewrld::{CancellationToken, Client, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> juicewrld::Res<()> {
//!     let client = Client::from_env()?;
//!     let cancel = CancellationToken::new();
//!     let result = client.search_songs(&cancel, &SearchQuery::new("lucid dreams")).await?;
//!     println!("{} matches", result.total);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod time;
pub mod types;
pub mod utils;

pub use client::{Client, ClientBuilder, PathTemplates, SearchQuery, SongsQuery};
pub use error::{Error, Result};
pub use tokio_util::sync::CancellationToken;

/// A convenient Result type alias for application-level code.
///
/// The library itself returns [`Result`] with the typed [`Error`]; binaries and
/// glue code that mix library errors with configuration or I/O failures use this
/// boxed variant instead.
///
/// # Example
///
/// ```rust,ignore
/// use juicewrld::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```rust,ignore
/// info!("Resolving song {}...", id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```rust,ignore
/// success!("Saved {} bytes", len);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr and exits the
/// program with code 1.
///
/// Only for fatal errors; code after the macro does not run.
///
/// # Example
///
/// ```rust,ignore
/// error!("Failed to build client: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```rust,ignore
/// warning!("File may not exist at {}", path);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
