//! # Spotify Integration Module
//!
//! This module is the integration layer between spshuffle and the Spotify Web
//! API. It covers the OAuth flow that authenticates the user and the playlist
//! endpoints the shuffle core drives through [`PlaylistService`].
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! Shuffle Core (fetch → shuffle → remove → add)
//!     ↓  PlaylistService
//! Spotify Integration Layer
//!     ├── Authentication (authorization code / PKCE)
//!     └── Playlist Operations (read, remove, add, metadata)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Module
//!
//! [`auth`] implements the OAuth 2.0 authorization code flow:
//! - **Client Secret**: When a secret is configured the code exchange authenticates
//!   with HTTP basic auth, matching the classic confidential-client flow
//! - **PKCE**: Without a secret a code verifier/challenge pair protects the exchange
//! - **Token Cache**: Tokens are stored in the local data directory and refreshed
//!   four minutes before they expire
//! - **Scope Check**: A cached token that lacks a requested scope triggers a new
//!   authorization instead of failing later with 403 responses
//! - **Local Callback Server**: A temporary axum server receives the redirect and
//!   is stopped once the flow has a result
//!
//! ## Playlist Module
//!
//! [`playlist`] provides [`playlist::SpotifyPlaylists`]:
//! - `GET /playlists/{id}/tracks` - One page of up to 100 entries
//! - `DELETE /playlists/{id}/tracks` - Remove all occurrences of up to 100 URIs
//! - `POST /playlists/{id}/tracks` - Append up to 100 URIs in order
//! - `GET /playlists/{id}` - Name, URL and track count for display
//!
//! Non-success responses become [`ServiceError::Api`](crate::error::ServiceError::Api)
//! carrying the status code and the message from Spotify's error body. The
//! client does not retry on its own; every failed request is retried by the
//! shuffle core's [`RetryPolicy`](crate::shuffle::RetryPolicy).
//!
//! ## Usage
//!
//! ```rust,ignore
//! let credentials = Credentials { client_id, client_secret };
//! let token_mgr = spotify::auth::authorize(&credentials, &config::spotify_scope()).await?;
//! let service = spotify::playlist::SpotifyPlaylists::new(token_mgr);
//! let outcome = Shuffler::new(&service).run(&playlist, &mut rand::rng()).await?;
//! ```
//!
//! [`PlaylistService`]: crate::shuffle::PlaylistService

pub mod auth;
pub mod playlist;
