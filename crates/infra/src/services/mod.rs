mod discord;
mod documents;
mod inmemory;
mod youtube;

pub use discord::DiscordNotifier;
pub use documents::{fetch_document, FetchDocumentError};
pub use inmemory::{
    FailingCall, InMemoryNotifier, InMemoryPlaylistProvider, PlaylistProviderCalls,
};
use promptbot_domain::providers::youtube::PlaylistItemsPage;
pub use youtube::{ClientSecret, YouTubePlaylistProvider};

/// An external service hosting playlists of videos
#[async_trait::async_trait]
pub trait IPlaylistProvider: Send + Sync {
    /// Creates an empty playlist and returns its id
    async fn create_playlist(&self, title: &str, description: &str) -> anyhow::Result<String>;
    /// One page of the playlist members. `page_token` is the
    /// `next_page_token` of the previous page.
    async fn list_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<PlaylistItemsPage>;
    async fn insert_item(&self, playlist_id: &str, video_id: &str) -> anyhow::Result<()>;
    async fn delete_item(&self, item_id: &str) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send_direct_message(&self, user_id: &str, text: &str) -> anyhow::Result<()>;
}
