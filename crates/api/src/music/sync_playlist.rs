use crate::shared::{
    dependencies::Dependency,
    usecase::{DependencyBoundary, UseCase},
};
use promptbot_domain::providers::youtube::{extract_video_id, PlaylistItem};
use promptbot_domain::{ConvergencePlan, PlaylistBinding, PlaylistKey};
use promptbot_infra::{BotContext, IPlaylistProvider};
use std::collections::HashSet;
use tracing::{error, info};

/// Makes the playlist of a `PlaylistKey` hold exactly the YouTube videos
/// that were submitted for it.
///
/// The playlist is created on the first run and reused afterwards. Every
/// run reads the submissions and the whole playlist again, then inserts
/// what is missing and deletes what is no longer submitted. A failing call
/// stops the run and leaves the playlist partly converged until the next
/// run. Submissions that are not YouTube links are ignored.
#[derive(Debug)]
pub struct SyncPlaylistUseCase {
    pub key: PlaylistKey,
}

#[derive(Debug)]
pub struct SyncedPlaylist {
    pub binding: PlaylistBinding,
    pub inserted: usize,
    pub deleted: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    /// There are no submissions for the key, so no playlist was touched
    NothingSubmitted,
    StorageError,
    PlaylistsUnavailable,
    CreateFailed,
    /// The playlist was created but could not be remembered. It is left
    /// behind and a new one is created by the next run.
    BindingNotSaved { playlist_id: String },
    ListFailed,
    UpdateFailed,
}

async fn list_all_items(
    playlists: &dyn IPlaylistProvider,
    playlist_id: &str,
) -> anyhow::Result<Vec<PlaylistItem>> {
    let mut items = Vec::new();
    let mut seen_tokens = HashSet::new();
    let mut page_token: Option<String> = None;
    loop {
        let page = playlists
            .list_items(playlist_id, page_token.as_deref())
            .await?;
        items.extend(page.items);
        match page.next_page_token {
            Some(token) => {
                if !seen_tokens.insert(token.clone()) {
                    anyhow::bail!("Page token: {} of playlist: {} was returned twice", token, playlist_id);
                }
                page_token = Some(token);
            }
            None => break,
        }
    }
    Ok(items)
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncPlaylistUseCase {
    type Response = SyncedPlaylist;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;
        let playlists = ctx
            .playlists
            .as_ref()
            .ok_or(UseCaseErrors::PlaylistsUnavailable)?;

        let submissions = repos
            .submissions
            .find_by_query(&self.key.submission_query())
            .await
            .map_err(|e| {
                error!("Unable to look up submissions for {:?}. Error: {:?}", self.key, e);
                UseCaseErrors::StorageError
            })?;
        if submissions.is_empty() {
            return Err(UseCaseErrors::NothingSubmitted);
        }

        let binding = repos
            .playlist_bindings
            .find(&self.key)
            .await
            .map_err(|e| {
                error!("Unable to look up playlist binding for {:?}. Error: {:?}", self.key, e);
                UseCaseErrors::StorageError
            })?;
        let binding = match binding {
            Some(binding) => binding,
            None => {
                let community = &ctx.config.community_name;
                let playlist_id = playlists
                    .create_playlist(&self.key.title(community), &self.key.description(community))
                    .await
                    .map_err(|e| {
                        error!("Unable to create playlist for {:?}. Error: {:?}", self.key, e);
                        UseCaseErrors::CreateFailed
                    })?;
                let binding = PlaylistBinding {
                    key: self.key.clone(),
                    playlist_id,
                };
                if let Err(e) = repos.playlist_bindings.insert(&binding).await {
                    error!(
                        "Created playlist: {} for {:?} but could not save it. Error: {:?}",
                        binding.playlist_id, self.key, e
                    );
                    return Err(UseCaseErrors::BindingNotSaved {
                        playlist_id: binding.playlist_id,
                    });
                }
                info!("Created playlist: {} for {:?}", binding.playlist_id, self.key);
                binding
            }
        };

        let current = list_all_items(playlists.as_ref(), &binding.playlist_id)
            .await
            .map_err(|e| {
                error!("Unable to list playlist: {}. Error: {:?}", binding.playlist_id, e);
                UseCaseErrors::ListFailed
            })?;

        let wanted: Vec<String> = submissions
            .iter()
            .filter_map(|submission| extract_video_id(&submission.song))
            .collect();
        let plan = ConvergencePlan::new(&wanted, &current);

        for video_id in &plan.to_insert {
            playlists
                .insert_item(&binding.playlist_id, video_id)
                .await
                .map_err(|e| {
                    error!("Unable to update playlist: {}. Error: {:?}", binding.playlist_id, e);
                    UseCaseErrors::UpdateFailed
                })?;
        }
        for item in &plan.to_delete {
            playlists
                .delete_item(&item.id)
                .await
                .map_err(|e| {
                    error!("Unable to update playlist: {}. Error: {:?}", binding.playlist_id, e);
                    UseCaseErrors::UpdateFailed
                })?;
        }

        Ok(SyncedPlaylist {
            binding,
            inserted: plan.to_insert.len(),
            deleted: plan.to_delete.len(),
        })
    }
}

impl DependencyBoundary for SyncPlaylistUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::Store, Dependency::Playlists]
    }

    fn feature(&self) -> &'static str {
        "playlists"
    }
}
