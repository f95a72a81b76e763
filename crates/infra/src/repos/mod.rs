mod month;
mod playlist_binding;
mod reminder;
mod shared;
mod submission;

pub use month::IMonthRepo;
use month::{InMemoryMonthRepo, PostgresMonthRepo};
pub use playlist_binding::IPlaylistBindingRepo;
use playlist_binding::{InMemoryPlaylistBindingRepo, PostgresPlaylistBindingRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use submission::ISubmissionRepo;
use submission::{InMemorySubmissionRepo, PostgresSubmissionRepo};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub months: Arc<dyn IMonthRepo>,
    pub submissions: Arc<dyn ISubmissionRepo>,
    pub playlist_bindings: Arc<dyn IPlaylistBindingRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB CHECKING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB CHECKING MIGRATIONS ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            months: Arc::new(PostgresMonthRepo::new(pool.clone())),
            submissions: Arc::new(PostgresSubmissionRepo::new(pool.clone())),
            playlist_bindings: Arc::new(PostgresPlaylistBindingRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            months: Arc::new(InMemoryMonthRepo::new()),
            submissions: Arc::new(InMemorySubmissionRepo::new()),
            playlist_bindings: Arc::new(InMemoryPlaylistBindingRepo::new()),
        }
    }
}
