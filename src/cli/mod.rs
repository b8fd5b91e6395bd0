//! # CLI Module
//!
//! Command implementations for the `discspot` binary, plus the terminal host
//! the pipeline runs in when driven from a shell.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify consent flow and caches the token
//! - [`resolve`] - Resolves a Discogs page to a Spotify album
//! - [`search`] - Shows every candidate each search strategy finds, with scores
//! - [`callback`] - Completes a consent flow from a pasted redirect URL
//! - [`logout`] - Deletes the cached token
//!
//! ## Host adapters
//!
//! [`CommandLinePage`] stands in for the Discogs page, [`TerminalRenderer`]
//! prints what a browser would show next to the heading, and
//! [`BrowserOpener`] opens the authorize page in the default browser.
//!
//! ## Usage
//!
//! ```bash
//! discspot auth
//! discspot resolve https://www.discogs.com/release/123 \
//!     --title "The Beatles – Abbey Road" --artist "The Beatles"
//! discspot search --title "Abbey Road" --artist "The Beatles"
//! ```

mod auth;
mod callback;
mod context;
mod host;
mod resolve;
mod search;

pub use auth::auth;
pub use auth::logout;
pub use callback::callback;
pub use context::Services;
pub use context::services;
pub use host::BrowserOpener;
pub use host::CommandLinePage;
pub use host::TerminalRenderer;
pub use resolve::resolve;
pub use search::search;
