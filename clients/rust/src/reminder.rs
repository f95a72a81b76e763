use crate::{APIResponse, BaseClient};
use promptbot_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub user_id: String,
    pub reminder: String,
    /// Offset from now, e.g. "5d3h30m"
    pub when: String,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            user_id: input.user_id,
            reminder: input.reminder,
            when: input.when,
        };
        self.base
            .post(body, "reminder".into(), StatusCode::CREATED)
            .await
    }
}
