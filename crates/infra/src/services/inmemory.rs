use super::{INotifier, IPlaylistProvider};
use promptbot_domain::providers::youtube::{PlaylistItem, PlaylistItemsPage};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Number of external calls an `InMemoryPlaylistProvider` has served
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistProviderCalls {
    pub created: usize,
    pub listed: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl PlaylistProviderCalls {
    /// Calls that changed a playlist
    pub fn writes(&self) -> usize {
        self.created + self.inserted + self.deleted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailingCall {
    Create,
    List,
    Insert,
    Delete,
}

#[derive(Default)]
struct PlaylistState {
    playlists: HashMap<String, Vec<PlaylistItem>>,
    titles: HashMap<String, String>,
    next_id: usize,
    calls: PlaylistProviderCalls,
    failing: Option<FailingCall>,
}

impl PlaylistState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Playlist provider that keeps playlists in memory. Pages are small so
/// that callers have to follow page tokens.
pub struct InMemoryPlaylistProvider {
    state: Mutex<PlaylistState>,
    page_size: usize,
}

impl InMemoryPlaylistProvider {
    pub fn new() -> Self {
        Self::with_page_size(2)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(Default::default()),
            page_size: page_size.max(1),
        }
    }

    /// Adds a video to a playlist without counting it as a call
    pub fn seed_item(&self, playlist_id: &str, video_id: &str) -> PlaylistItem {
        let mut state = self.state.lock().unwrap();
        let item = PlaylistItem {
            id: state.next_id("item"),
            video_id: video_id.to_string(),
        };
        state
            .playlists
            .entry(playlist_id.to_string())
            .or_default()
            .push(item.clone());
        item
    }

    pub fn items(&self, playlist_id: &str) -> Vec<PlaylistItem> {
        let state = self.state.lock().unwrap();
        state.playlists.get(playlist_id).cloned().unwrap_or_default()
    }

    pub fn video_ids(&self, playlist_id: &str) -> Vec<String> {
        self.items(playlist_id)
            .into_iter()
            .map(|item| item.video_id)
            .collect()
    }

    pub fn title(&self, playlist_id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.titles.get(playlist_id).cloned()
    }

    pub fn calls(&self) -> PlaylistProviderCalls {
        self.state.lock().unwrap().calls.clone()
    }

    /// Makes every call of the given kind fail until reset with `None`
    pub fn fail(&self, call: Option<FailingCall>) {
        self.state.lock().unwrap().failing = call;
    }
}

impl Default for InMemoryPlaylistProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn check(state: &PlaylistState, call: FailingCall) -> anyhow::Result<()> {
    if state.failing == Some(call) {
        anyhow::bail!("Playlist provider is failing {:?} calls", call);
    }
    Ok(())
}

#[async_trait::async_trait]
impl IPlaylistProvider for InMemoryPlaylistProvider {
    async fn create_playlist(&self, title: &str, _description: &str) -> anyhow::Result<String> {
        let mut state = self.state.lock().unwrap();
        check(&state, FailingCall::Create)?;
        state.calls.created += 1;
        let playlist_id = state.next_id("playlist");
        state.playlists.insert(playlist_id.clone(), Vec::new());
        state.titles.insert(playlist_id.clone(), title.to_string());
        Ok(playlist_id)
    }

    async fn list_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<PlaylistItemsPage> {
        let mut state = self.state.lock().unwrap();
        check(&state, FailingCall::List)?;
        state.calls.listed += 1;
        let items = match state.playlists.get(playlist_id) {
            Some(items) => items,
            None => anyhow::bail!("Playlist not found: {}", playlist_id),
        };
        let start = match page_token {
            Some(token) => token.parse::<usize>()?,
            None => 0,
        };
        let end = (start + self.page_size).min(items.len());
        let page = items.get(start..end).map(|p| p.to_vec()).unwrap_or_default();
        let next_page_token = if end < items.len() {
            Some(end.to_string())
        } else {
            None
        };

        Ok(PlaylistItemsPage {
            items: page,
            next_page_token,
        })
    }

    async fn insert_item(&self, playlist_id: &str, video_id: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        check(&state, FailingCall::Insert)?;
        state.calls.inserted += 1;
        let item = PlaylistItem {
            id: state.next_id("item"),
            video_id: video_id.to_string(),
        };
        match state.playlists.get_mut(playlist_id) {
            Some(items) => items.push(item),
            None => anyhow::bail!("Playlist not found: {}", playlist_id),
        };
        Ok(())
    }

    async fn delete_item(&self, item_id: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        check(&state, FailingCall::Delete)?;
        state.calls.deleted += 1;
        for items in state.playlists.values_mut() {
            if let Some(pos) = items.iter().position(|item| item.id == item_id) {
                items.remove(pos);
                return Ok(());
            }
        }
        anyhow::bail!("Playlist item not found: {}", item_id)
    }
}

/// Notifier that records the messages it was asked to send
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<(String, String)>>,
    unreachable_users: Mutex<HashSet<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Default::default()
    }

    /// (user id, text) of every message that was delivered
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Messages to this user fail from now on
    pub fn make_unreachable(&self, user_id: &str) {
        self.unreachable_users
            .lock()
            .unwrap()
            .insert(user_id.to_string());
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn send_direct_message(&self, user_id: &str, text: &str) -> anyhow::Result<()> {
        if self.unreachable_users.lock().unwrap().contains(user_id) {
            anyhow::bail!("User {} does not accept direct messages", user_id);
        }
        self.sent
            .lock()
            .unwrap()
            .push((user_id.to_string(), text.to_string()));
        Ok(())
    }
}
