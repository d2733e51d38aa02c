use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::{ConsoleProgress, prompt},
    config, error, info,
    management::TokenManager,
    shuffle::{PlaylistRef, PlaylistService, ShuffleOutcome, Shuffler},
    spotify::{self, playlist::SpotifyPlaylists},
    success,
    types::PlaylistMetadata,
    warning,
};

/// Converts Ctrl-C into a clean exit for the rest of the process lifetime.
fn watch_interrupt(progress: Arc<ConsoleProgress>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            progress.report_partial_state();
            prompt::cancelled();
        }
    });
}

/// Authenticates with the configured or prompted credentials, exiting on failure.
pub(crate) async fn authenticate() -> TokenManager {
    let credentials = prompt::credentials();
    match spotify::auth::authorize(&credentials, &config::spotify_scope()).await {
        Ok(manager) => manager,
        Err(e) => error!("Authentication failed: {}", e),
    }
}

/// Loads the display metadata of `playlist`, exiting if it cannot be read.
pub(crate) async fn load_metadata(
    service: &SpotifyPlaylists,
    playlist: &PlaylistRef,
    progress: &ConsoleProgress,
) -> PlaylistMetadata {
    let policy = config::retry_policy();
    match policy
        .run("fetch playlist details", progress, || {
            service.get_playlist_metadata(playlist)
        })
        .await
    {
        Ok(metadata) => metadata,
        Err(e) => error!("Cannot load playlist {}: {}", playlist, e),
    }
}

pub async fn shuffle(playlist: Option<String>, assume_yes: bool) {
    let progress = Arc::new(ConsoleProgress::new());
    watch_interrupt(Arc::clone(&progress));

    let token_mgr = authenticate().await;
    let playlist = prompt::playlist_ref(playlist);
    let service = SpotifyPlaylists::new(token_mgr);

    let metadata = load_metadata(&service, &playlist, &progress).await;
    info!("Playlist: {}", metadata.name.green());
    info!("URL: {}", metadata.external_url.blue());
    info!("Total tracks: {}", metadata.total_tracks.to_string().green());

    if !assume_yes
        && !prompt::confirm("WARNING: This will modify the playlist directly. Continue?")
    {
        prompt::cancelled();
    }

    let mut rng = StdRng::from_os_rng();
    let outcome = Shuffler::new(&service)
        .with_policy(config::retry_policy())
        .with_observer(progress.as_ref())
        .run(&playlist, &mut rng)
        .await;
    progress.finish();

    match outcome {
        Ok(ShuffleOutcome::Empty) => warning!("Empty playlist - nothing to shuffle."),
        Ok(ShuffleOutcome::Shuffled { order }) => {
            success!(
                "Playlist '{}' successfully shuffled ({} tracks)!",
                metadata.name,
                order.len()
            );
            info!("Access it at: {}", metadata.external_url.blue());
        }
        Err(e) => error!("Critical error: {}", e),
    }
}
