//! # CLI Module
//!
//! Command-line layer of `juicewrld`. Every command is a thin wrapper around one
//! or two [`Client`](crate::Client) operations that adds progress feedback,
//! table rendering and user-facing error messages.
//!
//! ## Command Categories
//!
//! ### Catalog
//!
//! - [`songs`] - One page of the song catalog with filters
//! - [`song`] - Full record of a single song
//! - [`search`] - Free-text search with offset/limit paging
//! - [`eras`] - All eras
//! - [`stats`] - Song counts per category and era
//! - [`categories`] - Category descriptors
//! - [`overview`] - Endpoint directory of the API
//!
//! ### Playback
//!
//! - [`play`] - Resolve a song to a stream URL, optionally opening it in the browser
//! - [`stream`] - Probe an explicit storage path for streaming
//!
//! ### Files
//!
//! - [`browse`] - List a remote directory or search below it
//! - [`file_info`] - Metadata of one remote file
//! - [`download`] - Save a remote file atomically to disk
//! - [`cover_art`] - Save the cover art of an audio file
//!
//! ### Archive Jobs
//!
//! - [`zip_start`], [`zip_status`], [`zip_cancel`] - Server-side zip job lifecycle
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Client Layer (Endpoint operations)
//!     ↓
//! Transport (reqwest)
//! ```
//!
//! ## Error Handling
//!
//! Library errors are fatal for a command: they are printed with the red
//! [`error!`](crate::error!) marker and the process exits with code 1. A Ctrl-C
//! cancels the shared token instead; the running request is dropped and the
//! command exits with code 130.
//!
//! ## Usage Patterns
//!
//! ```bash
//! juicewrld songs --category unreleased --page 2
//! juicewrld search "lucid dreams" --limit 10 --offset 20
//! juicewrld play 1337 --open
//! juicewrld download "Compilation/2. Unreleased Discography/Tell Me U Luv Me.mp3"
//! juicewrld zip start "Snippets/Cigarettes" "Session Edits/Rental.mp3"
//! ```

mod catalog;
mod files;
mod play;
mod zip;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, error::Error, warning};

pub use catalog::{categories, eras, overview, search, song, songs, stats};
pub use files::{browse, cover_art, download, file_info};
pub use play::{play, stream};
pub use zip::{zip_cancel, zip_start, zip_status};

/// Exit code used when the user interrupts a command.
pub const EXIT_CANCELLED: i32 = 130;

pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Reports a failed command and exits.
pub(crate) fn fail(pb: &ProgressBar, context: &str, e: Error) -> ! {
    pb.finish_and_clear();
    if e.is_cancelled() {
        warning!("{}: cancelled", context);
        std::process::exit(EXIT_CANCELLED);
    }
    error!("{}. Err: {}", context, e)
}

pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
