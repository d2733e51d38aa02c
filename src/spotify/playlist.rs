use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::Mutex;

use crate::{
    config,
    error::ServiceError,
    management::TokenManager,
    shuffle::{PlaylistRef, PlaylistService},
    types::{
        AddTrackToPlaylistRequest, ApiErrorResponse, PlaylistItem, PlaylistItemsResponse,
        PlaylistMetadata, PlaylistResponse, RemoveTracksFromPlaylistRequest, TrackUri,
    },
};

/// Spotify Web API implementation of [`PlaylistService`].
///
/// Every request asks the token manager for a valid access token first, so
/// long runs survive a token expiring mid-way.
pub struct SpotifyPlaylists {
    client: Client,
    api_url: String,
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyPlaylists {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self::with_api_url(token_mgr, config::spotify_apiurl())
    }

    pub fn with_api_url(token_mgr: TokenManager, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token_mgr: Mutex::new(token_mgr),
        }
    }

    fn tracks_url(&self, playlist: &PlaylistRef) -> String {
        format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist.id()
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let token = self
            .token_mgr
            .lock()
            .await
            .get_valid_token()
            .await
            .map_err(ServiceError::Auth)?;

        let response = request.bearer_auth(token).send().await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut message = response.text().await.unwrap_or_default();
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&message) {
        message = err.error.message;
    }
    if message.is_empty() {
        message = status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }

    Err(ServiceError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PlaylistService for SpotifyPlaylists {
    async fn fetch_page(
        &self,
        playlist: &PlaylistRef,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PlaylistItem>, ServiceError> {
        let request = self.client.get(self.tracks_url(playlist)).query(&[
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("additional_types", "track".to_string()),
            ("fields", "items(track(uri,name)),next,total".to_string()),
        ]);

        let page = self.send(request).await?.json::<PlaylistItemsResponse>().await?;
        Ok(page.items)
    }

    async fn remove_items(
        &self,
        playlist: &PlaylistRef,
        uris: &[String],
    ) -> Result<(), ServiceError> {
        let body = RemoveTracksFromPlaylistRequest {
            tracks: uris.iter().map(|uri| TrackUri { uri: uri.clone() }).collect(),
        };
        let request = self.client.delete(self.tracks_url(playlist)).json(&body);

        self.send(request).await?;
        Ok(())
    }

    async fn add_items(&self, playlist: &PlaylistRef, uris: &[String]) -> Result<(), ServiceError> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let request = self.client.post(self.tracks_url(playlist)).json(&body);

        self.send(request).await?;
        Ok(())
    }

    async fn get_playlist_metadata(
        &self,
        playlist: &PlaylistRef,
    ) -> Result<PlaylistMetadata, ServiceError> {
        let url = format!(
            "{uri}/playlists/{id}",
            uri = self.api_url,
            id = playlist.id()
        );
        let request = self
            .client
            .get(url)
            .query(&[("fields", "name,external_urls,tracks.total")]);

        let res = self.send(request).await?.json::<PlaylistResponse>().await?;
        Ok(res.into())
    }
}
