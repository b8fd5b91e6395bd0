//! discspot library
//!
//! Resolves a Discogs release (a title and an artist scraped from the page) to a
//! Spotify album and renders an embedded player for it. The library holds the
//! matching core and the trait seams for everything environment specific; the
//! `discspot` binary plugs terminal, file and browser implementations into them.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations and terminal host adapters
//! - `config` - Configuration management and environment variables
//! - `coordinator` - The per-page pipeline: token, match, render
//! - `error` - Error types
//! - `management` - Token lifecycle, pipeline guard and persistence
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client, search and matching
//! - `traits` - Seams to the host environment
//! - `types` - Data structures and type definitions
//! - `utils` - Text normalization, similarity and URL helpers
//!
//! # Example
//!
//! ```
//! use discspot::config;
//!
//! #[tokio::main]
//! async fn main() -> discspot::Res<()> {
//!     config::load_env().await?;
//!     discspot::cli::logout().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod traits;
pub mod types;
pub mod utils;

/// Result alias for command plumbing in the binary, where any error is
/// reported and ends the command. Library code returns the typed errors in
/// [`error`] instead.
///
/// # Example
///
/// ```
/// use discspot::Res;
///
/// async fn resolve() -> Res<Option<String>> {
///     Ok(Some("abc123".to_string()))
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line behind a blue `o`.
///
/// Used for progress through the pipeline: queries sent, waits, retries.
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Searching: {}", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line behind a green check mark when something worked out.
///
/// ```
/// success!("Match found: {}", album_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line behind a red `!` and exits with code 1.
///
/// Only the binary uses this. Nothing in the library is fatal to the
/// pipeline, so library code reports through [`warning!`] and degrades.
///
/// ```
/// error!("Cannot load settings. Err: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line behind a yellow `!` for recoverable problems: a failed
/// search strategy, a rejected token, a store that could not be written.
///
/// ```
/// warning!("Search failed for '{}'. Err: {}", query, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
