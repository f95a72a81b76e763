use chrono::{DateTime, TimeZone, Utc};
use promptbot_api::Application;
use promptbot_infra::{BotContext, ISys, InMemoryNotifier, InMemoryPlaylistProvider, Repos};
use promptbot_sdk::PromptbotSDK;
use std::sync::Arc;

struct StaticTimeSys(DateTime<Utc>);

impl ISys for StaticTimeSys {
    fn get_now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct TestApp {
    pub repos: Option<Repos>,
    pub playlists: Arc<InMemoryPlaylistProvider>,
    pub notifier: Arc<InMemoryNotifier>,
}

/// Mid January 2024
pub fn mid_january() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

async fn launch(ctx: BotContext) -> PromptbotSDK {
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    PromptbotSDK::new(address)
}

// Launch the application as a background task, frozen at `now`
pub async fn spawn_app_at(now: DateTime<Utc>) -> (TestApp, PromptbotSDK) {
    let playlists = Arc::new(InMemoryPlaylistProvider::new());
    let notifier = Arc::new(InMemoryNotifier::new());

    let mut ctx = BotContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.community_name = "Speedfriends".into();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.playlists = Some(playlists.clone());
    ctx.notifier = Some(notifier.clone());

    let app = TestApp {
        repos: ctx.repos.clone(),
        playlists,
        notifier,
    };
    let sdk = launch(ctx).await;
    (app, sdk)
}

pub async fn spawn_app() -> (TestApp, PromptbotSDK) {
    spawn_app_at(mid_january()).await
}

// Launch the application without a store, playlists or notifier
pub async fn spawn_unconfigured_app() -> PromptbotSDK {
    let mut ctx = BotContext::create_inmemory();
    ctx.config.port = 0;
    ctx.sys = Arc::new(StaticTimeSys(mid_january()));
    ctx.repos = None;
    ctx.playlists = None;
    ctx.notifier = None;
    launch(ctx).await
}
