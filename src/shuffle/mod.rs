//! # Shuffle Core
//!
//! Reorders a remote playlist into a random permutation. A run is a strictly
//! sequential pipeline:
//!
//! ```text
//! Start → Fetch → (empty? → Done) → Shuffle → Remove → Add → Done
//! ```
//!
//! - [`fetch_tracks`] reads the playlist page by page
//! - [`shuffle_tracks`] permutes the URIs with an injectable RNG
//! - [`rewrite_playlist`] removes the original tracks and re-adds them in the new order
//! - [`batch`] splits sequences into request-sized chunks
//! - [`RetryPolicy`] wraps every remote call with a fixed-delay retry
//!
//! The core never prints. Progress and failures are reported through a
//! [`ProgressObserver`] so the CLI decides how to present them.
//!
//! ## Partial rewrites
//!
//! Remove and add are separate API calls with no transaction around them. If
//! a batch fails for good, the run stops and the playlist keeps whatever
//! batches were already applied. Running the shuffle again works on that
//! intermediate state. Other clients editing the same playlist during a run
//! are not detected; the last writer wins.

mod batch;
mod engine;
mod fetch;
mod playlist_ref;
mod progress;
mod retry;
mod rewrite;
mod service;

pub use batch::{MAX_ITEMS_PER_REQUEST, batch};
pub use engine::shuffle_tracks;
pub use fetch::fetch_tracks;
pub use playlist_ref::PlaylistRef;
pub use progress::{NoopObserver, Phase, ProgressObserver};
pub use retry::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, RetryPolicy};
pub use rewrite::rewrite_playlist;
pub use service::PlaylistService;

use rand::Rng;

use crate::error::ShuffleError;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShuffleOutcome {
    /// The playlist had no tracks; nothing was changed.
    Empty,
    /// The playlist now holds `order`.
    Shuffled { order: Vec<String> },
}

/// Runs fetch, shuffle and rewrite for one playlist.
pub struct Shuffler<'a, S: PlaylistService + ?Sized> {
    service: &'a S,
    policy: RetryPolicy,
    observer: &'a dyn ProgressObserver,
}

impl<'a, S: PlaylistService + ?Sized> Shuffler<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            policy: RetryPolicy::default(),
            observer: &NoopObserver,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = observer;
        self
    }

    pub async fn run<R: Rng + ?Sized>(
        &self,
        playlist: &PlaylistRef,
        rng: &mut R,
    ) -> Result<ShuffleOutcome, ShuffleError> {
        match self.run_phases(playlist, rng).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.observer.on_fatal_error(&err);
                Err(err)
            }
        }
    }

    async fn run_phases<R: Rng + ?Sized>(
        &self,
        playlist: &PlaylistRef,
        rng: &mut R,
    ) -> Result<ShuffleOutcome, ShuffleError> {
        self.observer.on_phase_start(Phase::Fetch, 0);
        let original = fetch_tracks(self.service, playlist, &self.policy, self.observer).await?;
        if original.is_empty() {
            return Ok(ShuffleOutcome::Empty);
        }

        self.observer.on_phase_start(Phase::Shuffle, 1);
        let shuffled = shuffle_tracks(&original, rng);
        self.observer.on_batch_done(Phase::Shuffle, 1, 1);

        rewrite_playlist(
            self.service,
            playlist,
            &original,
            &shuffled,
            &self.policy,
            self.observer,
        )
        .await?;

        Ok(ShuffleOutcome::Shuffled { order: shuffled })
    }
}
