use crate::{
    error::ShuffleError,
    shuffle::{MAX_ITEMS_PER_REQUEST, Phase, PlaylistRef, PlaylistService, ProgressObserver, RetryPolicy},
};

/// Reads every track URI of `playlist` in playlist order.
///
/// Pages of [`MAX_ITEMS_PER_REQUEST`] entries are requested at increasing
/// offsets until a page comes back empty or short. Entries whose track is
/// gone are dropped, but the short-page check uses the raw entry count so a
/// full page with unavailable tracks still leads to the next request.
pub async fn fetch_tracks<S>(
    service: &S,
    playlist: &PlaylistRef,
    policy: &RetryPolicy,
    observer: &dyn ProgressObserver,
) -> Result<Vec<String>, ShuffleError>
where
    S: PlaylistService + ?Sized,
{
    let mut tracks: Vec<String> = Vec::new();
    let mut offset = 0;
    let mut page_no = 0;

    loop {
        page_no += 1;
        let operation = format!("fetch tracks at offset {}", offset);
        let items = policy
            .run(&operation, observer, || {
                service.fetch_page(playlist, MAX_ITEMS_PER_REQUEST, offset)
            })
            .await?;

        let raw_count = items.len();
        tracks.extend(items.iter().filter_map(|item| item.uri()).map(str::to_string));
        observer.on_batch_done(Phase::Fetch, page_no, 0);

        if raw_count < MAX_ITEMS_PER_REQUEST {
            return Ok(tracks);
        }

        offset += MAX_ITEMS_PER_REQUEST;
    }
}
