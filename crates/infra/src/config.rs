use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Clone)]
pub struct DiscordSettings {
    /// Token of the bot user that sends direct messages
    pub bot_token: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
pub struct YouTubeSettings {
    /// Path to the OAuth client secret file downloaded from the Google console
    pub client_secret_file: String,
    /// Long lived token produced by the one time OAuth consent
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. Everything that needs the store is
    /// unavailable without it.
    pub database_url: Option<String>,
    /// Name of the community, used in playlist titles and descriptions
    pub community_name: String,
    /// How often the send reminders job looks for due reminders
    pub reminder_poll_interval: Duration,
    pub discord: Option<DiscordSettings>,
    pub youtube: Option<YouTubeSettings>,
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn new() -> Self {
        let default_port = 5000;
        let port = match optional_env("PORT") {
            None => default_port,
            Some(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
        };

        let database_url = optional_env("DATABASE_URL");
        if database_url.is_none() {
            warn!("Did not find DATABASE_URL environment variable. Reminders and music months will not work.");
        }

        let community_name = optional_env("COMMUNITY_NAME").unwrap_or_else(|| "Speedfriends".into());

        let default_interval_secs = 60;
        let reminder_poll_interval = match optional_env("REMINDER_POLL_INTERVAL_SECS") {
            None => default_interval_secs,
            Some(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "The given REMINDER_POLL_INTERVAL_SECS: {} is not valid, falling back to: {}.",
                        secs, default_interval_secs
                    );
                    default_interval_secs
                }
            },
        };

        let discord = match optional_env("DISCORD_BOT_TOKEN") {
            Some(bot_token) => Some(DiscordSettings {
                bot_token,
                api_base_url: optional_env("DISCORD_API_URL")
                    .unwrap_or_else(|| DEFAULT_DISCORD_API_URL.into()),
            }),
            None => {
                warn!("Did not find DISCORD_BOT_TOKEN environment variable. Reminders will not be delivered.");
                None
            }
        };

        let client_secret_file = optional_env("YOUTUBE_CLIENT_SECRET_FILE")
            .unwrap_or_else(|| "client_secret.json".into());
        let youtube = match optional_env("YOUTUBE_REFRESH_TOKEN") {
            Some(refresh_token) => Some(YouTubeSettings {
                client_secret_file,
                refresh_token,
            }),
            None => {
                info!("Did not find YOUTUBE_REFRESH_TOKEN environment variable. Playlists will not work.");
                None
            }
        };

        Self {
            port,
            database_url,
            community_name,
            reminder_poll_interval: Duration::from_secs(reminder_poll_interval),
            discord,
            youtube,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
