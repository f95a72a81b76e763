mod inmemory;
mod postgres;

pub use inmemory::InMemorySubmissionRepo;
pub use postgres::PostgresSubmissionRepo;
use promptbot_domain::{Submission, SubmissionQuery, ID};

#[async_trait::async_trait]
pub trait ISubmissionRepo: Send + Sync {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()>;
    async fn find_by_query(&self, query: &SubmissionQuery) -> anyhow::Result<Vec<Submission>>;
    async fn delete(&self, submission_id: &ID) -> anyhow::Result<()>;
}
