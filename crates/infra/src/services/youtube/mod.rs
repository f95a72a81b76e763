mod auth_provider;
mod playlist_api;

use super::IPlaylistProvider;
pub use auth_provider::ClientSecret;
use auth_provider::GoogleAuthProvider;
use playlist_api::{
    InsertPlaylistItemRequest, InsertPlaylistRequest, PlaylistSnippet, PlaylistStatus,
    YouTubeRestApi, YOUTUBE_API_BASE_URL,
};
use promptbot_domain::providers::youtube::PlaylistItemsPage;

/// Playlists made by the bot can be opened by anyone with the link
const PLAYLIST_PRIVACY: &str = "unlisted";

pub struct YouTubePlaylistProvider {
    auth: GoogleAuthProvider,
    api: YouTubeRestApi,
}

impl YouTubePlaylistProvider {
    pub fn new(secret: ClientSecret, refresh_token: String) -> Self {
        Self::with_base_url(secret, refresh_token, YOUTUBE_API_BASE_URL.to_string())
    }

    pub fn with_base_url(secret: ClientSecret, refresh_token: String, base_url: String) -> Self {
        Self {
            auth: GoogleAuthProvider::new(secret, refresh_token),
            api: YouTubeRestApi::new(base_url),
        }
    }
}

#[async_trait::async_trait]
impl IPlaylistProvider for YouTubePlaylistProvider {
    async fn create_playlist(&self, title: &str, description: &str) -> anyhow::Result<String> {
        let access_token = self.auth.get_access_token().await?;
        let body = InsertPlaylistRequest {
            snippet: PlaylistSnippet {
                title: title.to_string(),
                description: description.to_string(),
            },
            status: PlaylistStatus {
                privacy_status: PLAYLIST_PRIVACY.to_string(),
            },
        };
        let playlist = self.api.insert_playlist(&access_token, &body).await?;
        Ok(playlist.id)
    }

    async fn list_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<PlaylistItemsPage> {
        let access_token = self.auth.get_access_token().await?;
        let page = self
            .api
            .list_playlist_items(&access_token, playlist_id, page_token)
            .await?;
        Ok(page.into())
    }

    async fn insert_item(&self, playlist_id: &str, video_id: &str) -> anyhow::Result<()> {
        let access_token = self.auth.get_access_token().await?;
        self.api
            .insert_playlist_item(
                &access_token,
                &InsertPlaylistItemRequest::new(playlist_id, video_id),
            )
            .await
    }

    async fn delete_item(&self, item_id: &str) -> anyhow::Result<()> {
        let access_token = self.auth.get_access_token().await?;
        self.api.delete_playlist_item(&access_token, item_id).await
    }
}
