use rand::{Rng, seq::SliceRandom};

/// Returns a uniformly random permutation of `tracks`.
///
/// Uses the Fisher-Yates shuffle from `rand`. Pass a seeded RNG to get a
/// reproducible order.
pub fn shuffle_tracks<R: Rng + ?Sized>(tracks: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = tracks.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
