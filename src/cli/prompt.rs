use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::{config, error, info, shuffle::PlaylistRef, types::Credentials};

/// Ends the process as a user cancellation, which is not an error.
pub fn cancelled() -> ! {
    info!("Operation cancelled by user.");
    std::process::exit(0);
}

/// Collects the app credentials from the environment, prompting for what is missing.
///
/// The client ID is required. An empty client secret selects the PKCE flow.
pub fn credentials() -> Credentials {
    let theme = ColorfulTheme::default();

    let client_id = match config::spotify_client_id() {
        Some(id) => id,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Enter your Spotify App Client ID")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_else(|_| cancelled())
            .trim()
            .to_string(),
    };
    if client_id.is_empty() {
        error!("Client ID is required");
    }

    let client_secret = match config::spotify_client_secret() {
        Some(secret) => Some(secret),
        None => Some(
            Password::with_theme(&theme)
                .with_prompt("Enter your Spotify App Client Secret (leave empty for PKCE)")
                .allow_empty_password(true)
                .interact()
                .unwrap_or_else(|_| cancelled())
                .trim()
                .to_string(),
        )
        .filter(|s| !s.is_empty()),
    };

    Credentials {
        client_id,
        client_secret,
    }
}

/// Uses `arg` or asks for a playlist URL, URI or ID.
pub fn playlist_ref(arg: Option<String>) -> PlaylistRef {
    let input = match arg {
        Some(value) => value,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter playlist URL or ID")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_else(|_| cancelled()),
    };

    let playlist = PlaylistRef::parse(&input);
    if playlist.is_empty() {
        error!("Playlist reference is required");
    }
    playlist
}

pub fn confirm(message: &str) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}
