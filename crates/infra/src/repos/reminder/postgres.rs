use super::IReminderRepo;
use chrono::{DateTime, Utc};
use promptbot_domain::{Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_id: String,
    message: String,
    remind_at: DateTime<Utc>,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_id,
            message: raw.message,
            remind_at: raw.remind_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_id, message, remind_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.user_id)
        .bind(&reminder.message)
        .bind(reminder.remind_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.remind_at < $1
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
