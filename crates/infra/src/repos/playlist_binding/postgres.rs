use super::IPlaylistBindingRepo;
use promptbot_domain::{PlaylistBinding, PlaylistKey};
use sqlx::{FromRow, PgPool};

pub struct PostgresPlaylistBindingRepo {
    pool: PgPool,
}

impl PostgresPlaylistBindingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlaylistBindingRaw {
    month_label: String,
    day: i64,
    scope_user_id: String,
    playlist_id: String,
}

impl From<PlaylistBindingRaw> for PlaylistBinding {
    fn from(raw: PlaylistBindingRaw) -> Self {
        Self {
            key: PlaylistKey {
                month_label: raw.month_label,
                day: raw.day,
                scope_user_id: raw.scope_user_id,
            },
            playlist_id: raw.playlist_id,
        }
    }
}

#[async_trait::async_trait]
impl IPlaylistBindingRepo for PostgresPlaylistBindingRepo {
    async fn insert(&self, binding: &PlaylistBinding) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO music_playlists
            (month_label, day, scope_user_id, playlist_id)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(&binding.key.month_label)
        .bind(binding.key.day)
        .bind(&binding.key.scope_user_id)
        .bind(&binding.playlist_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, key: &PlaylistKey) -> anyhow::Result<Option<PlaylistBinding>> {
        let binding: Option<PlaylistBindingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM music_playlists AS p
            WHERE p.month_label = $1 AND p.day = $2 AND p.scope_user_id = $3
            "#,
        )
        .bind(&key.month_label)
        .bind(key.day)
        .bind(&key.scope_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(binding.map(|b| b.into()))
    }
}
