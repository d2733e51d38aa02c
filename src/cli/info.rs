use tabled::Table;

use crate::{
    cli::{
        ConsoleProgress, prompt,
        shuffle::{authenticate, load_metadata},
    },
    spotify::playlist::SpotifyPlaylists,
    types::PlaylistTableRow,
};

/// Prints name, URL and track count of a playlist without modifying it.
pub async fn info(playlist: Option<String>) {
    let token_mgr = authenticate().await;
    let playlist = prompt::playlist_ref(playlist);
    let service = SpotifyPlaylists::new(token_mgr);

    let progress = ConsoleProgress::new();
    let metadata = load_metadata(&service, &playlist, &progress).await;

    let table = Table::new(vec![PlaylistTableRow {
        name: metadata.name,
        url: metadata.external_url,
        tracks: metadata.total_tracks,
    }]);
    println!("{}", table);
}
