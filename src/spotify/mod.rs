//! # Spotify Integration Module
//!
//! This module is the integration layer between discspot and the Spotify Web
//! API. It covers the HTTP plumbing, the implicit-grant consent flow and album
//! search, and hands typed results to the rest of the crate.
//!
//! ## Architecture
//!
//! ```text
//! Coordinator / CLI
//!          ↓
//! Spotify Integration Layer
//!     ├── Search (strategies, scoring, matching)
//!     ├── Authentication (implicit grant, liveness check)
//!     └── Client (retry, rate limiting, auth failures)
//!          ↓
//! HttpTransport (reqwest in the CLI, fakes in tests)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Client
//!
//! [`client`] - [`client::SpotifyClient`] is the only place requests are sent
//! from. It adds the bearer token, waits out `429` responses for the
//! `retry-after` the server asks for, retries transient failures after a fixed
//! delay and gives up at once on `401`, since a rejected token will not get
//! better by asking again.
//!
//! ### Search
//!
//! [`search`] - Turns a noisy title/artist pair into up to three queries,
//! tried one after the other, and accepts the first candidate whose similarity
//! scores clear the thresholds. A failed query only costs recall; the next
//! strategy still runs.
//!
//! ### Authentication
//!
//! [`auth`] - Builds the implicit-grant authorize URL, performs the `/me`
//! liveness check used to validate tokens, and drives the interactive consent
//! flow for the command line.
//!
//! ### Transport
//!
//! [`transport`] - The `reqwest` implementation of
//! [`crate::traits::HttpTransport`].
//!
//! ## API Coverage
//!
//! - `GET /search?q=<query>&type=album&limit=10` - album search
//! - `GET /me` - token liveness check
//! - `GET https://accounts.spotify.com/authorize` - consent screen, opened in a browser
//!
//! ## Error Types
//!
//! Everything returns [`crate::error::ApiError`]:
//! - **`Transport`** - network errors and timeouts
//! - **`RateLimited`** - `429` on the last attempt, or an excessive `retry-after`
//! - **`AuthExpired`** - `401`, the token must be replaced
//! - **`Status`** - any other non-2xx status
//! - **`Decode`** - a body that is not the JSON we expected

pub mod auth;
pub mod client;
pub mod search;
pub mod transport;
