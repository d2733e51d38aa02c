//! # CLI Module
//!
//! This module provides the command-line interface layer for spshuffle. It
//! implements the user-facing commands and connects the shuffle core, the
//! Spotify integration and user interaction.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify authorization flow and caches the token
//! - [`shuffle`] - Shuffles a playlist in place after confirmation
//! - [`info`] - Shows name, URL and track count of a playlist
//!
//! ## Shuffle Flow
//!
//! 1. **Credentials**: Read from the environment or prompted for
//! 2. **Authentication**: Cached token reused or a new authorization started
//! 3. **Playlist**: Taken from the argument or prompted for, in URL, URI or ID form
//! 4. **Summary**: Playlist name, URL and track count displayed
//! 5. **Confirmation**: Explicit yes required unless `--yes` is given
//! 6. **Shuffle**: Fetch, shuffle, remove and add with progress bars
//!
//! ## Exit Status
//!
//! - `0` - Shuffled, empty playlist, declined confirmation or Ctrl-C
//! - `1` - Missing input, failed authentication or a fatal remote error
//!
//! A fatal error or an interrupt during the remove or add phase leaves the
//! playlist partially rewritten. The CLI reports how many batches were applied
//! so the user can inspect the playlist before running the command again.

mod auth;
mod info;
mod progress;
mod prompt;
mod shuffle;

pub use auth::auth;
pub use info::info;
pub use progress::ConsoleProgress;
pub use shuffle::shuffle;
