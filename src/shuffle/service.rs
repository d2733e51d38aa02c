use async_trait::async_trait;

use crate::{
    error::ServiceError,
    shuffle::PlaylistRef,
    types::{PlaylistItem, PlaylistMetadata},
};

/// Remote operations the shuffle core needs from a playlist service.
///
/// Slices passed to `remove_items` and `add_items` never exceed
/// [`MAX_ITEMS_PER_REQUEST`](crate::shuffle::MAX_ITEMS_PER_REQUEST) items.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// Returns the raw entries of one page, including entries without a track.
    async fn fetch_page(
        &self,
        playlist: &PlaylistRef,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PlaylistItem>, ServiceError>;

    /// Removes every occurrence of the given track URIs.
    async fn remove_items(&self, playlist: &PlaylistRef, uris: &[String])
    -> Result<(), ServiceError>;

    /// Appends the given track URIs in order.
    async fn add_items(&self, playlist: &PlaylistRef, uris: &[String]) -> Result<(), ServiceError>;

    async fn get_playlist_metadata(
        &self,
        playlist: &PlaylistRef,
    ) -> Result<PlaylistMetadata, ServiceError>;
}
