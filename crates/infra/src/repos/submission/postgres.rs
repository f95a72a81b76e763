use super::ISubmissionRepo;
use promptbot_domain::{Submission, SubmissionQuery, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresSubmissionRepo {
    pool: PgPool,
}

impl PostgresSubmissionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubmissionRaw {
    submission_uid: Uuid,
    user_id: String,
    month_label: String,
    day: i64,
    song: String,
}

impl From<SubmissionRaw> for Submission {
    fn from(raw: SubmissionRaw) -> Self {
        Self {
            id: raw.submission_uid.into(),
            user_id: raw.user_id,
            month_label: raw.month_label,
            day: raw.day,
            song: raw.song,
        }
    }
}

#[async_trait::async_trait]
impl ISubmissionRepo for PostgresSubmissionRepo {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO music_submissions
            (submission_uid, user_id, month_label, day, song)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(submission.id.inner_ref())
        .bind(&submission.user_id)
        .bind(&submission.month_label)
        .bind(submission.day)
        .bind(&submission.song)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_query(&self, query: &SubmissionQuery) -> anyhow::Result<Vec<Submission>> {
        // NULL filters match every row
        let submissions: Vec<SubmissionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM music_submissions AS s
            WHERE s.month_label = $1
                AND ($2::TEXT IS NULL OR s.user_id = $2)
                AND ($3::BIGINT IS NULL OR s.day = $3)
            ORDER BY s.day ASC, s.created ASC
            "#,
        )
        .bind(&query.month_label)
        .bind(query.user_id.as_deref())
        .bind(query.day)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions.into_iter().map(|s| s.into()).collect())
    }

    async fn delete(&self, submission_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM music_submissions AS s
            WHERE s.submission_uid = $1
            "#,
        )
        .bind(submission_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
