use promptbot_domain::providers::youtube::{PlaylistItem, PlaylistItemsPage};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::error;

pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const MAX_PAGE_SIZE: &str = "50";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    pub privacy_status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistRequest {
    pub snippet: PlaylistSnippet,
    pub status: PlaylistStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: String,
    pub video_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub playlist_id: String,
    pub resource_id: ResourceId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPlaylistItemRequest {
    pub snippet: PlaylistItemSnippet,
}

impl InsertPlaylistItemRequest {
    pub fn new(playlist_id: &str, video_id: &str) -> Self {
        Self {
            snippet: PlaylistItemSnippet {
                playlist_id: playlist_id.to_string(),
                resource_id: ResourceId {
                    kind: "youtube#video".to_string(),
                    video_id: video_id.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemResource {
    pub id: String,
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItemResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl From<ListPlaylistItemsResponse> for PlaylistItemsPage {
    fn from(res: ListPlaylistItemsResponse) -> Self {
        Self {
            items: res
                .items
                .into_iter()
                .map(|item| PlaylistItem {
                    id: item.id,
                    video_id: item.content_details.video_id,
                })
                .collect(),
            next_page_token: res.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

// https://developers.google.com/youtube/v3/docs/playlistItems
pub struct YouTubeRestApi {
    client: Client,
    base_url: String,
}

impl YouTubeRestApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, req: RequestBuilder, access_token: &str, verb: &str) -> anyhow::Result<reqwest::Response> {
        match req
            .header("authorization", format!("Bearer {}", access_token))
            .send()
            .await
        {
            Ok(res) => res.error_for_status().map_err(|e| {
                error!(
                    "[Unexpected Response] YouTube API {} error. Error message: {:?}",
                    verb, e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] YouTube API {} error. Error message: {:?}",
                    verb, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn json<T: DeserializeOwned>(res: reqwest::Response, verb: &str) -> anyhow::Result<T> {
        res.json::<T>().await.map_err(|e| {
            error!(
                "[Unexpected Response] YouTube API {} error. Error message: {:?}",
                verb, e
            );
            anyhow::Error::new(e)
        })
    }

    pub async fn insert_playlist(
        &self,
        access_token: &str,
        body: &InsertPlaylistRequest,
    ) -> anyhow::Result<InsertPlaylistResponse> {
        let req = self
            .client
            .post(self.url("playlists"))
            .query(&[("part", "snippet,status")])
            .json(body);
        let res = self.send(req, access_token, "POST").await.map_err(|e| {
            error!("Failed to create youtube playlist with body: {:?}. Error message: {:?}", body, e);
            e
        })?;
        Self::json(res, "POST").await
    }

    pub async fn list_playlist_items(
        &self,
        access_token: &str,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> anyhow::Result<ListPlaylistItemsResponse> {
        let mut query = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", MAX_PAGE_SIZE),
        ];
        if let Some(page_token) = page_token {
            query.push(("pageToken", page_token));
        }
        let req = self.client.get(self.url("playlistItems")).query(&query);
        let res = self.send(req, access_token, "GET").await.map_err(|e| {
            error!("Failed to list items of youtube playlist: {}. Error message: {:?}", playlist_id, e);
            e
        })?;
        Self::json(res, "GET").await
    }

    pub async fn insert_playlist_item(
        &self,
        access_token: &str,
        body: &InsertPlaylistItemRequest,
    ) -> anyhow::Result<()> {
        let req = self
            .client
            .post(self.url("playlistItems"))
            .query(&[("part", "snippet")])
            .json(body);
        self.send(req, access_token, "POST").await.map_err(|e| {
            error!("Failed to insert youtube playlist item with body: {:?}. Error message: {:?}", body, e);
            e
        })?;
        Ok(())
    }

    pub async fn delete_playlist_item(&self, access_token: &str, item_id: &str) -> anyhow::Result<()> {
        let req = self
            .client
            .delete(self.url("playlistItems"))
            .query(&[("id", item_id)]);
        self.send(req, access_token, "DELETE").await.map_err(|e| {
            error!("Failed to delete youtube playlist item: {}. Error message: {:?}", item_id, e);
            e
        })?;
        Ok(())
    }
}
