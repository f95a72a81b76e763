use crate::{APIResponse, BaseClient};
use promptbot_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct MusicClient {
    base: Arc<BaseClient>,
}

pub struct SetupMonthInput {
    pub user_id: String,
    /// URL of the month document
    pub file: String,
}

pub struct SubmitSongInput {
    pub user_id: String,
    pub song: String,
    pub day: Option<i64>,
}

pub struct GetPlaylistInput {
    pub user_id: String,
    pub mine: bool,
    pub day: Option<i64>,
}

impl MusicClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn setup_month(&self, input: SetupMonthInput) -> APIResponse<setup_month::APIResponse> {
        let body = setup_month::RequestBody {
            user_id: input.user_id,
            file: input.file,
        };
        self.base
            .post(body, "music/setup".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_month(&self) -> APIResponse<get_month::APIResponse> {
        self.base.get("music/month".into(), StatusCode::OK).await
    }

    pub async fn get_prompt(&self, day: Option<i64>) -> APIResponse<get_prompt::APIResponse> {
        let path = match day {
            Some(day) => format!("music/prompt?day={}", day),
            None => "music/prompt".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn submit_song(&self, input: SubmitSongInput) -> APIResponse<submit_song::APIResponse> {
        let body = submit_song::RequestBody {
            user_id: input.user_id,
            song: input.song,
            day: input.day,
        };
        self.base
            .post(body, "music".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_playlist(
        &self,
        input: GetPlaylistInput,
    ) -> APIResponse<get_playlist::APIResponse> {
        let body = get_playlist::RequestBody {
            user_id: input.user_id,
            mine: input.mine,
            day: input.day,
        };
        self.base
            .post(body, "music/playlist".into(), StatusCode::OK)
            .await
    }
}
