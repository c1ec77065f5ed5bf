//! Configuration management for the Juice WRLD API client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Unlike credentials-driven clients, every setting here
//! has a usable default, so a missing `.env` file or unset variable is never fatal.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

/// Default base address of the public API.
pub const DEFAULT_API_URL: &str = "https://juicewrldapi.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("juicewrld-rs/", env!("CARGO_PKG_VERSION"));

pub const ENV_API_URL: &str = "JUICEWRLD_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "JUICEWRLD_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "JUICEWRLD_USER_AGENT";
pub const ENV_DOWNLOAD_DIR: &str = "JUICEWRLD_DOWNLOAD_DIR";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `juicewrld/.env`. Variables already present in the
/// process environment are not overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/juicewrld/.env`
/// - macOS: `~/Library/Application Support/juicewrld/.env`
/// - Windows: `%LOCALAPPDATA%/juicewrld/.env`
///
/// # Returns
///
/// Returns `Ok(())` when the file was loaded or does not exist, or an error
/// string if directory creation fails or the file cannot be parsed.
///
/// # Example
///
/// ```
/// use juicewrld::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no .env file, using defaults");
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Location of the optional `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("juicewrld/.env");
    path
}

/// Returns the API base address.
///
/// Reads `JUICEWRLD_API_URL`, falling back to [`DEFAULT_API_URL`]. A trailing
/// slash is removed so paths can be appended directly.
///
/// # Example
///
/// ```
/// let base = juicewrld::config::api_url(); // e.g., "https://juicewrldapi.com"
/// ```
pub fn api_url() -> String {
    non_empty_var(ENV_API_URL)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Returns the per-request timeout.
///
/// Reads `JUICEWRLD_TIMEOUT_SECS`; unparseable or zero values fall back to
/// [`DEFAULT_TIMEOUT_SECS`].
pub fn request_timeout() -> Duration {
    let secs = non_empty_var(ENV_TIMEOUT_SECS)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

pub fn user_agent() -> String {
    non_empty_var(ENV_USER_AGENT).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}

/// Directory that receives downloads when no explicit destination is given.
///
/// Reads `JUICEWRLD_DOWNLOAD_DIR`, then the platform download directory, then
/// the current directory.
pub fn download_dir() -> PathBuf {
    non_empty_var(ENV_DOWNLOAD_DIR)
        .map(PathBuf::from)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
