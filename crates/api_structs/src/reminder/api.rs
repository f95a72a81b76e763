use serde::{Deserialize, Serialize};

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        /// What to be reminded of
        pub reminder: String,
        /// Offset from now, e.g. "5d3h30m"
        pub when: String,
    }

    pub type APIResponse = crate::dtos::CommandResponse;
}
