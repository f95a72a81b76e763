mod inmemory;
mod postgres;

pub use inmemory::InMemoryPlaylistBindingRepo;
pub use postgres::PostgresPlaylistBindingRepo;
use promptbot_domain::{PlaylistBinding, PlaylistKey};

#[async_trait::async_trait]
pub trait IPlaylistBindingRepo: Send + Sync {
    /// Fails if there already is a binding for the same key
    async fn insert(&self, binding: &PlaylistBinding) -> anyhow::Result<()>;
    async fn find(&self, key: &PlaylistKey) -> anyhow::Result<Option<PlaylistBinding>>;
}
