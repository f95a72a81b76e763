mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, DiscordSettings, YouTubeSettings};
pub use repos::{
    IMonthRepo, IPlaylistBindingRepo, IReminderRepo, ISubmissionRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

/// Everything a use case can reach. The store, the playlist provider and
/// the notifier are optional and `None` when they are not configured or
/// could not be reached at startup.
#[derive(Clone)]
pub struct BotContext {
    pub repos: Option<Repos>,
    pub playlists: Option<Arc<dyn IPlaylistProvider>>,
    pub notifier: Option<Arc<dyn INotifier>>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl BotContext {
    async fn create(config: Config) -> Self {
        let repos = match &config.database_url {
            Some(database_url) => match Repos::create_postgres(database_url).await {
                Ok(repos) => Some(repos),
                Err(e) => {
                    warn!("Unable to connect to the database. Error: {:?}", e);
                    None
                }
            },
            None => None,
        };

        let playlists = config.youtube.as_ref().and_then(|settings| {
            match ClientSecret::from_file(&settings.client_secret_file) {
                Ok(secret) => {
                    info!("YouTube playlists are enabled");
                    let provider = YouTubePlaylistProvider::new(secret, settings.refresh_token.clone());
                    Some(Arc::new(provider) as Arc<dyn IPlaylistProvider>)
                }
                Err(e) => {
                    warn!("Unable to set up YouTube playlists. Error: {:?}", e);
                    None
                }
            }
        });

        let notifier = config.discord.as_ref().map(|settings| {
            Arc::new(DiscordNotifier::new(settings.clone())) as Arc<dyn INotifier>
        });

        Self {
            repos,
            playlists,
            notifier,
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context with in-memory implementations of every dependency
    pub fn create_inmemory() -> Self {
        Self {
            repos: Some(Repos::create_inmemory()),
            playlists: Some(Arc::new(InMemoryPlaylistProvider::new())),
            notifier: Some(Arc::new(InMemoryNotifier::new())),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> BotContext {
    BotContext::create(Config::new()).await
}
