mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use promptbot_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// All `Reminder`s with `remind_at` strictly before `before`, in no particular order
    async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn finds_and_deletes_due_reminders() {
        let repo = InMemoryReminderRepo::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

        let overdue = Reminder::new("1".into(), "overdue".into(), now - Duration::hours(1));
        let exactly_now = Reminder::new("1".into(), "now".into(), now);
        let later = Reminder::new("2".into(), "later".into(), now + Duration::minutes(1));
        for reminder in [&overdue, &exactly_now, &later] {
            assert!(repo.insert(reminder).await.is_ok());
        }

        let due = repo.find_due(now).await.expect("To find due reminders");
        assert_eq!(due, vec![overdue.clone()]);

        assert!(repo.delete(&overdue.id).await.is_ok());
        assert!(repo.find_due(now).await.unwrap().is_empty());
        assert_eq!(
            repo.find_due(now + Duration::hours(1)).await.unwrap().len(),
            2
        );

        // Deleting twice is not an error
        assert!(repo.delete(&overdue.id).await.is_ok());
    }
}
