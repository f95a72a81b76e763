mod base;
mod music;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use music::MusicClient;
pub use music::{GetPlaylistInput, SetupMonthInput, SubmitSongInput};
pub use promptbot_api_structs::dtos::*;
use reminder::ReminderClient;
pub use reminder::CreateReminderInput;
use status::StatusClient;
use std::sync::Arc;

/// Promptbot SDK
///
/// The SDK contains methods for invoking the commands of the Promptbot
/// server API. Every command is answered with a `CommandResponse`.
#[derive(Clone)]
pub struct PromptbotSDK {
    pub music: MusicClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl PromptbotSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let music = MusicClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            music,
            reminder,
            status,
        }
    }
}
