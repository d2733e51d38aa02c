use crate::{
    error::ShuffleError,
    shuffle::{
        MAX_ITEMS_PER_REQUEST, Phase, PlaylistRef, PlaylistService, ProgressObserver, RetryPolicy,
        batch,
    },
};

/// Replaces the contents of `playlist` with `shuffled`.
///
/// First every batch of `original` is removed, then every batch of
/// `shuffled` is appended in order. The two steps are not atomic: if a batch
/// fails for good, the batches already sent stay applied and the playlist is
/// left partially emptied or partially rebuilt.
pub async fn rewrite_playlist<S>(
    service: &S,
    playlist: &PlaylistRef,
    original: &[String],
    shuffled: &[String],
    policy: &RetryPolicy,
    observer: &dyn ProgressObserver,
) -> Result<(), ShuffleError>
where
    S: PlaylistService + ?Sized,
{
    let remove_batches = batch(original, MAX_ITEMS_PER_REQUEST);
    let total = remove_batches.len();
    observer.on_phase_start(Phase::Remove, total);
    for (i, uris) in remove_batches.into_iter().enumerate() {
        let operation = format!("remove batch {}/{}", i + 1, total);
        policy
            .run(&operation, observer, || service.remove_items(playlist, uris))
            .await?;
        observer.on_batch_done(Phase::Remove, i + 1, total);
    }

    let add_batches = batch(shuffled, MAX_ITEMS_PER_REQUEST);
    let total = add_batches.len();
    observer.on_phase_start(Phase::Add, total);
    for (i, uris) in add_batches.into_iter().enumerate() {
        let operation = format!("add batch {}/{}", i + 1, total);
        policy
            .run(&operation, observer, || service.add_items(playlist, uris))
            .await?;
        observer.on_batch_done(Phase::Add, i + 1, total);
    }

    Ok(())
}
