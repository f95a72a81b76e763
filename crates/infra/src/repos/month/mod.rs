mod inmemory;
mod postgres;

pub use inmemory::InMemoryMonthRepo;
pub use postgres::PostgresMonthRepo;
use promptbot_domain::{MonthQuery, MusicMonth};

#[async_trait::async_trait]
pub trait IMonthRepo: Send + Sync {
    async fn insert(&self, month: &MusicMonth) -> anyhow::Result<()>;
    async fn find_one(&self, query: &MonthQuery) -> anyhow::Result<Option<MusicMonth>>;
}
