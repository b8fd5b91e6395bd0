//! # API Module
//!
//! HTTP endpoints of the local callback server that stands in for the OAuth
//! callback page when discspot runs from a terminal.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - The `redirect_uri` Spotify sends the browser to. The
//!   access token arrives in the URL fragment, which never reaches a server,
//!   so this endpoint answers with a tiny page that forwards the fragment to
//!   [`token`].
//! - [`token`] - Hands the forwarded token to the
//!   [`TokenManager`](crate::management::TokenManager) and redirects the
//!   browser back to the page the consent flow started from, when one was
//!   recorded.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use discspot::api::{callback, health, token};
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .route("/callback", get(callback))
//!     .route("/token", get(token).layer(Extension(tokens)));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use callback::token;
pub use health::health;
