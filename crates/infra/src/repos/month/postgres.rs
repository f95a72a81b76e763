use super::IMonthRepo;
use chrono::{DateTime, Utc};
use promptbot_domain::{MonthQuery, MusicMonth, PromptDay};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresMonthRepo {
    pool: PgPool,
}

impl PostgresMonthRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MonthRaw {
    month_uid: Uuid,
    start_time: DateTime<Utc>,
    days: Json<Vec<PromptDay>>,
}

impl From<MonthRaw> for MusicMonth {
    fn from(raw: MonthRaw) -> Self {
        Self {
            id: raw.month_uid.into(),
            start_time: raw.start_time,
            days: raw.days.0,
        }
    }
}

#[async_trait::async_trait]
impl IMonthRepo for PostgresMonthRepo {
    async fn insert(&self, month: &MusicMonth) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO music_months(month_uid, start_time, days)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(month.id.inner_ref())
        .bind(month.start_time)
        .bind(Json(&month.days))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_one(&self, query: &MonthQuery) -> anyhow::Result<Option<MusicMonth>> {
        let month: Option<MonthRaw> = match *query {
            MonthQuery::StartingAfter { after } => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM music_months AS m
                    WHERE m.start_time > $1
                    ORDER BY m.start_time ASC
                    LIMIT 1
                    "#,
                )
                .bind(after)
                .fetch_optional(&self.pool)
                .await?
            }
            MonthQuery::StartingBetween { after, before } => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM music_months AS m
                    WHERE m.start_time > $1 AND m.start_time < $2
                    ORDER BY m.start_time ASC
                    LIMIT 1
                    "#,
                )
                .bind(after)
                .bind(before)
                .fetch_optional(&self.pool)
                .await?
            }
            MonthQuery::StartedBefore { before } => {
                sqlx::query_as(
                    r#"
                    SELECT * FROM music_months AS m
                    WHERE m.start_time < $1
                    ORDER BY m.start_time DESC
                    LIMIT 1
                    "#,
                )
                .bind(before)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(month.map(|m| m.into()))
    }
}
