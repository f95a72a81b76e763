use super::sync_playlist::{self, SyncPlaylistUseCase, SyncedPlaylist};
use crate::error::BotError;
use crate::shared::{
    dependencies::Dependency,
    usecase::{execute, execute_with_dependencies, DependencyBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpResponse};
use promptbot_api_structs::get_playlist::*;
use promptbot_domain::providers::youtube::playlist_url;
use promptbot_domain::{MonthQuery, PlaylistKey, SubmissionQuery};
use promptbot_infra::BotContext;
use tracing::error;

/// "day 3 of Jan 2024" or "Jan 2024"
fn period(key: &PlaylistKey) -> String {
    match key.day() {
        Some(day) => format!("day {} of {}", day, key.month_label),
        None => key.month_label.clone(),
    }
}

fn handle_error(e: UseCaseErrors) -> BotError {
    match e {
        UseCaseErrors::NoMonth => BotError::NotFound("No music month past or present found".into()),
        UseCaseErrors::NoPick { day, month_label } => BotError::NotFound(format!(
            "I have no pick saved for you for day {} of {}",
            day, month_label
        )),
        UseCaseErrors::StorageError => BotError::InternalError(
            "Something went wrong at my end so I couldn't look up the songs".into(),
        ),
        UseCaseErrors::Sync(key, e) => match e {
            sync_playlist::UseCaseErrors::NothingSubmitted => match key.user_id() {
                Some(_) => BotError::NotFound(format!(
                    "You haven't submitted any songs for {}",
                    period(&key)
                )),
                None => BotError::NotFound(format!(
                    "No-one has submitted any songs for {}",
                    period(&key)
                )),
            },
            sync_playlist::UseCaseErrors::StorageError => BotError::InternalError(
                "Something went wrong at my end so I couldn't look up the songs".into(),
            ),
            sync_playlist::UseCaseErrors::PlaylistsUnavailable => {
                BotError::Unavailable("playlists".into())
            }
            sync_playlist::UseCaseErrors::CreateFailed
            | sync_playlist::UseCaseErrors::BindingNotSaved { .. } => {
                BotError::InternalError("Error creating a playlist".into())
            }
            sync_playlist::UseCaseErrors::ListFailed => {
                BotError::InternalError("Error retrieving a playlist".into())
            }
            sync_playlist::UseCaseErrors::UpdateFailed => {
                BotError::InternalError("Error updating a playlist".into())
            }
        },
    }
}

fn format_reply(res: UseCaseResponse) -> String {
    match res {
        UseCaseResponse::Pick {
            day,
            month_label,
            song,
        } => format!("Your pick for day {} of {} was {}", day, month_label, song),
        UseCaseResponse::Playlist(synced) => {
            let key = &synced.binding.key;
            let scope = match key.user_id() {
                Some(_) => " (your picks)",
                None => "",
            };
            format!(
                "Playlist for {}{}: {}",
                key.describe(),
                scope,
                playlist_url(&synced.binding.playlist_id)
            )
        }
    }
}

pub async fn get_playlist_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<BotContext>,
) -> Result<HttpResponse, BotError> {
    let body = body.0;
    let usecase = GetPlaylistUseCase {
        user_id: body.user_id,
        mine: body.mine,
        day: body.day,
    };

    execute_with_dependencies(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(format_reply(res))))
        .map_err(|e| match e {
            UseCaseErrorContainer::Unavailable(feature) => BotError::Unavailable(feature),
            UseCaseErrorContainer::UseCase(e) => handle_error(e),
        })
}

/// Answers with the playlist of the latest music month that has started.
///
/// The playlist holds everyone's songs, or only the asking member's with
/// `mine`, for a single day or the whole month. A member asking for their
/// own pick of a single day gets the song back instead of a playlist.
#[derive(Debug)]
pub struct GetPlaylistUseCase {
    pub user_id: String,
    pub mine: bool,
    pub day: Option<i64>,
}

impl GetPlaylistUseCase {
    fn wants_single_pick(&self) -> bool {
        self.mine && self.day.is_some()
    }
}

#[derive(Debug)]
pub enum UseCaseResponse {
    Pick {
        day: i64,
        month_label: String,
        song: String,
    },
    Playlist(SyncedPlaylist),
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NoMonth,
    NoPick { day: i64, month_label: String },
    StorageError,
    Sync(PlaylistKey, sync_playlist::UseCaseErrors),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPlaylistUseCase {
    type Response = UseCaseResponse;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;

        let month = repos
            .months
            .find_one(&MonthQuery::most_recent(ctx.sys.get_now()))
            .await
            .map_err(|e| {
                error!("Unable to look up the most recent music month. Error: {:?}", e);
                UseCaseErrors::StorageError
            })?
            .ok_or(UseCaseErrors::NoMonth)?;
        let month_label = month.label();

        if let (true, Some(day)) = (self.mine, self.day) {
            // No playlist for a single song
            let query = SubmissionQuery::month(month_label.clone())
                .for_user(self.user_id.clone())
                .on_day(day);
            let picks = repos
                .submissions
                .find_by_query(&query)
                .await
                .map_err(|e| {
                    error!("Unable to look up picks for {:?}. Error: {:?}", query, e);
                    UseCaseErrors::StorageError
                })?;
            return match picks.into_iter().next() {
                Some(pick) => Ok(UseCaseResponse::Pick {
                    day,
                    month_label,
                    song: pick.song,
                }),
                None => Err(UseCaseErrors::NoPick { day, month_label }),
            };
        }

        let user_id = if self.mine {
            Some(self.user_id.clone())
        } else {
            None
        };
        let key = PlaylistKey::new(month_label, self.day, user_id);
        let sync = SyncPlaylistUseCase { key: key.clone() };
        execute(sync, ctx)
            .await
            .map(UseCaseResponse::Playlist)
            .map_err(|e| UseCaseErrors::Sync(key, e))
    }
}

impl DependencyBoundary for GetPlaylistUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        if self.wants_single_pick() {
            vec![Dependency::Store]
        } else {
            vec![Dependency::Store, Dependency::Playlists]
        }
    }

    fn feature(&self) -> &'static str {
        if self.wants_single_pick() {
            "music months"
        } else {
            "playlists"
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{mid_january, setup_at, TestContext};
    use chrono::{TimeZone, Utc};
    use promptbot_domain::{MusicMonth, PromptDay, Submission};

    async fn setup() -> TestContext {
        let test_ctx = setup_at(mid_january());
        let repos = test_ctx.ctx.repos.clone().unwrap();
        let month = MusicMonth::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            vec![PromptDay {
                day: 1,
                prompt: "Favorite song".into(),
            }],
        )
        .unwrap();
        repos.months.insert(&month).await.unwrap();
        for (user, day, song) in [
            ("1", 1, "https://youtu.be/A"),
            ("2", 1, "https://youtu.be/B"),
            ("1", 2, "https://youtu.be/C"),
        ] {
            let submission = Submission::new(user.into(), "Jan 2024".into(), day, song.into());
            repos.submissions.insert(&submission).await.unwrap();
        }
        test_ctx
    }

    fn usecase(mine: bool, day: Option<i64>) -> GetPlaylistUseCase {
        GetPlaylistUseCase {
            user_id: "1".into(),
            mine,
            day,
        }
    }

    #[actix_web::main]
    #[test]
    async fn answers_own_pick_of_a_day_without_playlist() {
        let TestContext { ctx, playlists, .. } = setup().await;

        let res = usecase(true, Some(1)).execute(&ctx).await.unwrap();
        assert_eq!(
            format_reply(res),
            "Your pick for day 1 of Jan 2024 was https://youtu.be/A"
        );
        assert!(matches!(
            usecase(true, Some(3)).execute(&ctx).await,
            Err(UseCaseErrors::NoPick { day: 3, .. })
        ));
        assert_eq!(playlists.calls().writes(), 0);

        // Does not need the playlist provider
        assert_eq!(usecase(true, Some(1)).dependencies(), vec![Dependency::Store]);
    }

    #[actix_web::main]
    #[test]
    async fn builds_playlists_for_every_scope() {
        let TestContext { ctx, playlists, .. } = setup().await;

        let day = usecase(false, Some(1)).execute(&ctx).await.unwrap();
        let reply = format_reply(day);
        assert!(reply.starts_with("Playlist for Jan 2024 Day 1: https://youtube.com/playlist?list="));

        let month = usecase(false, None).execute(&ctx).await.unwrap();
        match month {
            UseCaseResponse::Playlist(synced) => {
                let mut video_ids = playlists.video_ids(&synced.binding.playlist_id);
                video_ids.sort();
                assert_eq!(video_ids, vec!["A", "B", "C"]);
            }
            _ => panic!("Expected a playlist"),
        }

        let mine = usecase(true, None).execute(&ctx).await.unwrap();
        assert!(format_reply(mine).starts_with("Playlist for Jan 2024 (your picks): "));
        assert_eq!(playlists.calls().created, 3);
    }

    #[actix_web::main]
    #[test]
    async fn reports_empty_selections() {
        let TestContext { ctx, .. } = setup().await;

        let e = usecase(false, Some(9)).execute(&ctx).await.unwrap_err();
        assert_eq!(
            handle_error(e).to_string(),
            "No-one has submitted any songs for day 9 of Jan 2024"
        );

        let mut usecase = GetPlaylistUseCase {
            user_id: "3".into(),
            mine: true,
            day: None,
        };
        let e = usecase.execute(&ctx).await.unwrap_err();
        assert_eq!(
            handle_error(e).to_string(),
            "You haven't submitted any songs for Jan 2024"
        );
    }

    #[actix_web::main]
    #[test]
    async fn needs_a_started_month() {
        let ctx = setup_at(mid_january()).ctx;
        assert!(matches!(
            usecase(false, None).execute(&ctx).await,
            Err(UseCaseErrors::NoMonth)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn names_the_missing_feature() {
        let TestContext { mut ctx, .. } = setup().await;

        ctx.playlists = None;
        match execute_with_dependencies(usecase(false, Some(1)), &ctx).await {
            Err(UseCaseErrorContainer::Unavailable(feature)) => assert_eq!(feature, "playlists"),
            _ => panic!("Expected the usecase to be unavailable"),
        }
        // A single pick needs no playlists
        assert!(execute_with_dependencies(usecase(true, Some(1)), &ctx).await.is_ok());

        ctx.repos = None;
        match execute_with_dependencies(usecase(true, Some(1)), &ctx).await {
            Err(UseCaseErrorContainer::Unavailable(feature)) => {
                assert_eq!(feature, "music months")
            }
            _ => panic!("Expected the usecase to be unavailable"),
        }
    }
}
