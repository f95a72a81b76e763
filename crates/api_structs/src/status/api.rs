use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        /// Which of the optional dependencies this instance was set up with
        pub store_available: bool,
        pub playlists_available: bool,
        pub notifier_available: bool,
    }
}
