//! Configuration management for the Spotify Playlist Shuffler.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings and the retry
//! policy used for remote calls.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::shuffle::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, RetryPolicy};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_SCOPE: &str = "playlist-read-private playlist-modify-private playlist-modify-public";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spshuffle/.env`. A missing file is not an
/// error: every setting can also come from the process environment or, for
/// credentials, from an interactive prompt.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spshuffle/.env`
/// - macOS: `~/Library/Application Support/spshuffle/.env`
/// - Windows: `%LOCALAPPDATA%/spshuffle/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spshuffle/.env");
    path
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the server address for the local OAuth callback server.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:8080`. The port must
/// match the one in the redirect URI.
pub fn server_addr() -> String {
    non_empty_var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID, if configured.
///
/// Reads `SPOTIFY_API_AUTH_CLIENT_ID`. When absent the CLI prompts for it.
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret, if configured.
///
/// Reads `SPOTIFY_API_AUTH_CLIENT_SECRET`.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Reads `SPOTIFY_API_REDIRECT_URI`. This must match the redirect URI
/// registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    non_empty_var("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string())
}

/// Returns the Spotify API scope permissions.
///
/// Reads `SPOTIFY_API_AUTH_SCOPE`. The default grants reading private
/// playlists and modifying both public and private ones.
pub fn spotify_scope() -> String {
    non_empty_var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string())
}

pub fn spotify_apiauth_url() -> String {
    non_empty_var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    non_empty_var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    non_empty_var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the retry policy applied to every playlist request.
///
/// `SPSHUFFLE_RETRY_ATTEMPTS` and `SPSHUFFLE_RETRY_DELAY_SECS` override the
/// default of 3 attempts with a fixed 5 second delay. Unparsable values fall
/// back to the defaults.
pub fn retry_policy() -> RetryPolicy {
    let attempts = non_empty_var("SPSHUFFLE_RETRY_ATTEMPTS")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_ATTEMPTS);
    let delay = non_empty_var("SPSHUFFLE_RETRY_DELAY_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_DELAY);

    RetryPolicy::new(attempts, delay)
}
