use super::IPlaylistBindingRepo;
use crate::repos::shared::inmemory_repo::*;
use promptbot_domain::{PlaylistBinding, PlaylistKey};

pub struct InMemoryPlaylistBindingRepo {
    bindings: std::sync::Mutex<Vec<PlaylistBinding>>,
}

impl InMemoryPlaylistBindingRepo {
    pub fn new() -> Self {
        Self {
            bindings: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPlaylistBindingRepo for InMemoryPlaylistBindingRepo {
    async fn insert(&self, binding: &PlaylistBinding) -> anyhow::Result<()> {
        let mut bindings = self.bindings.lock().unwrap();
        if bindings.iter().any(|b| b.key == binding.key) {
            return Err(anyhow::anyhow!(
                "A playlist is already bound to {:?}",
                binding.key
            ));
        }
        bindings.push(binding.clone());
        Ok(())
    }

    async fn find(&self, key: &PlaylistKey) -> anyhow::Result<Option<PlaylistBinding>> {
        Ok(find_by(&self.bindings, |b| b.key == *key).into_iter().next())
    }
}
