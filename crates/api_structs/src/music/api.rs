use serde::{Deserialize, Serialize};

pub mod setup_month {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        /// URL of the JSON document describing the month
        pub file: String,
    }

    pub type APIResponse = crate::dtos::CommandResponse;
}

pub mod get_month {
    pub type APIResponse = crate::dtos::CommandResponse;
}

pub mod get_prompt {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub day: Option<i64>,
    }

    pub type APIResponse = crate::dtos::CommandResponse;
}

pub mod submit_song {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        pub song: String,
        /// Defaults to today's day of the month
        #[serde(default)]
        pub day: Option<i64>,
    }

    pub type APIResponse = crate::dtos::CommandResponse;
}

pub mod get_playlist {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: String,
        /// Only the songs picked by `user_id`
        #[serde(default)]
        pub mine: bool,
        /// A single day instead of the whole month
        #[serde(default)]
        pub day: Option<i64>,
    }

    pub type APIResponse = crate::dtos::CommandResponse;
}
