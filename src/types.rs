use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Checks that every scope in the space separated `required` list was granted.
    pub fn covers_scope(&self, required: &str) -> bool {
        let granted: Vec<&str> = self.scope.split_whitespace().collect();
        required
            .split_whitespace()
            .all(|scope| granted.contains(&scope))
    }
}

/// Application credentials registered on the Spotify developer dashboard.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Option<String>,
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub credentials: Credentials,
    pub code_verifier: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

impl PlaylistItem {
    pub fn track(uri: &str) -> Self {
        Self {
            track: Some(PlaylistTrack {
                uri: Some(uri.to_string()),
                name: None,
            }),
        }
    }

    /// An entry whose track is no longer resolvable.
    pub fn unavailable() -> Self {
        Self { track: None }
    }

    /// The track URI, if the entry still points at a usable track.
    pub fn uri(&self) -> Option<&str> {
        self.track
            .as_ref()
            .and_then(|t| t.uri.as_deref())
            .filter(|uri| !uri.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub uri: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksFromPlaylistRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub name: String,
    pub external_urls: ExternalUrls,
    pub tracks: PlaylistTracksTotal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksTotal {
    pub total: u64,
}

/// Display information about a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMetadata {
    pub name: String,
    pub external_url: String,
    pub total_tracks: u64,
}

impl From<PlaylistResponse> for PlaylistMetadata {
    fn from(res: PlaylistResponse) -> Self {
        Self {
            name: res.name,
            external_url: res.external_urls.spotify.unwrap_or_default(),
            total_tracks: res.tracks.total,
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub url: String,
    pub tracks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}
