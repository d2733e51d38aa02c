//! # API Module
//!
//! HTTP endpoints served by the temporary local server that runs while the
//! user authorizes spshuffle in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization server.
//!   On `?code=...` it exchanges the code for a token and stores it in the
//!   shared [`AuthSession`](crate::types::AuthSession); on `?error=...` it
//!   records the denial so the waiting flow fails immediately instead of
//!   timing out.
//! - [`health`] - Returns status, name and version for quick checks while
//!   debugging redirect URI setups.
//!
//! The server is started by [`crate::spotify::auth::auth`] and aborted as
//! soon as the flow has a result.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spshuffle::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
