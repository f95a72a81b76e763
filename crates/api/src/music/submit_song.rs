use crate::error::BotError;
use crate::shared::{
    dependencies::Dependency,
    usecase::{execute_with_dependencies, DependencyBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpResponse};
use chrono::Datelike;
use promptbot_api_structs::submit_song::*;
use promptbot_domain::{MonthWindow, Submission, SubmissionQuery};
use promptbot_infra::BotContext;
use tracing::{error, warn};

fn handle_error(e: UseCaseErrors) -> BotError {
    match e {
        UseCaseErrors::NoActiveMonth => {
            BotError::NotFound("No currently active music month".into())
        }
        UseCaseErrors::InvalidDay(day) => {
            BotError::BadClientData(format!("No prompt found for day {}", day))
        }
        UseCaseErrors::StorageError => BotError::InternalError(
            "Something went wrong at my end so I didn't save your pick".into(),
        ),
    }
}

pub async fn submit_song_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<BotContext>,
) -> Result<HttpResponse, BotError> {
    let body = body.0;
    let usecase = SubmitSongUseCase {
        user_id: body.user_id,
        song: body.song,
        day: body.day,
    };

    execute_with_dependencies(usecase, &ctx)
        .await
        .map(|res| {
            let mut content = String::new();
            if let Some(replaced) = res.replaced {
                content.push_str(&format!("Replacing your old pick of {}\n", replaced.song));
            }
            content.push_str(&format!(
                "Submitting {} for day {}",
                res.submission.song, res.submission.day
            ));
            HttpResponse::Created().json(APIResponse::new(content))
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unavailable(feature) => BotError::Unavailable(feature),
            UseCaseErrorContainer::UseCase(e) => handle_error(e),
        })
}

/// Saves a member's song for a day of the running music month. An earlier
/// pick for the same day is deleted first.
#[derive(Debug)]
pub struct SubmitSongUseCase {
    pub user_id: String,
    pub song: String,
    /// Defaults to today
    pub day: Option<i64>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub submission: Submission,
    pub replaced: Option<Submission>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NoActiveMonth,
    InvalidDay(i64),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SubmitSongUseCase {
    type Response = UseCaseResponse;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;

        let now = ctx.sys.get_now();
        let month = repos
            .months
            .find_one(&MonthWindow::containing(now).strictly_current())
            .await
            .map_err(|e| {
                error!("Unable to look up the current music month. Error: {:?}", e);
                UseCaseErrors::StorageError
            })?
            .ok_or(UseCaseErrors::NoActiveMonth)?;

        let day = self.day.unwrap_or_else(|| now.day() as i64);
        if month.prompt(day).is_none() {
            return Err(UseCaseErrors::InvalidDay(day));
        }

        let query = SubmissionQuery::month(month.label())
            .for_user(self.user_id.clone())
            .on_day(day);
        let previous = repos
            .submissions
            .find_by_query(&query)
            .await
            .map_err(|e| {
                error!("Unable to look up previous picks for {:?}. Error: {:?}", query, e);
                UseCaseErrors::StorageError
            })?;

        // Replacing is a delete followed by an insert, not a single write
        for old in &previous {
            if let Err(e) = repos.submissions.delete(&old.id).await {
                warn!("Unable to delete replaced submission: {}. Error: {:?}", old.id, e);
                return Err(UseCaseErrors::StorageError);
            }
        }

        let submission = Submission::new(self.user_id.clone(), month.label(), day, self.song.clone());
        repos
            .submissions
            .insert(&submission)
            .await
            .map_err(|e| {
                error!("Unable to save submission: {}. Error: {:?}", submission.id, e);
                UseCaseErrors::StorageError
            })?;

        Ok(UseCaseResponse {
            submission,
            replaced: previous.into_iter().next(),
        })
    }
}

impl DependencyBoundary for SubmitSongUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::Store]
    }

    fn feature(&self) -> &'static str {
        "music months"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{mid_january, setup_at, with_flaky_store, StoreCall};
    use chrono::{TimeZone, Utc};
    use promptbot_domain::{MusicMonth, PromptDay};

    async fn setup_january() -> BotContext {
        let ctx = setup_at(mid_january()).ctx;
        let days = (1..=31)
            .map(|day| PromptDay {
                day,
                prompt: format!("Prompt {}", day),
            })
            .collect();
        let month =
            MusicMonth::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), days).unwrap();
        ctx.repos.as_ref().unwrap().months.insert(&month).await.unwrap();
        ctx
    }

    fn usecase(song: &str, day: Option<i64>) -> SubmitSongUseCase {
        SubmitSongUseCase {
            user_id: "1".into(),
            song: song.into(),
            day,
        }
    }

    #[actix_web::main]
    #[test]
    async fn second_pick_replaces_first() {
        let ctx = setup_january().await;

        let first = usecase("https://youtu.be/A", None).execute(&ctx).await.unwrap();
        assert_eq!(first.submission.day, 15);
        assert_eq!(first.submission.month_label, "Jan 2024");
        assert!(first.replaced.is_none());

        let second = usecase("https://youtu.be/B", Some(15))
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(second.replaced.map(|s| s.song), Some("https://youtu.be/A".to_string()));

        let stored = ctx
            .repos
            .as_ref()
            .unwrap()
            .submissions
            .find_by_query(&SubmissionQuery::month("Jan 2024".into()).for_user("1".into()).on_day(15))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].song, "https://youtu.be/B");
    }

    #[actix_web::main]
    #[test]
    async fn picks_on_other_days_are_kept() {
        let ctx = setup_january().await;
        usecase("A", Some(1)).execute(&ctx).await.unwrap();
        let res = usecase("B", Some(2)).execute(&ctx).await.unwrap();
        assert!(res.replaced.is_none());

        let stored = ctx
            .repos
            .as_ref()
            .unwrap()
            .submissions
            .find_by_query(&SubmissionQuery::month("Jan 2024".into()))
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_day_and_missing_month() {
        let ctx = setup_january().await;
        assert!(matches!(
            usecase("A", Some(32)).execute(&ctx).await,
            Err(UseCaseErrors::InvalidDay(32))
        ));

        let ctx = setup_at(mid_january()).ctx;
        assert!(matches!(
            usecase("A", None).execute(&ctx).await,
            Err(UseCaseErrors::NoActiveMonth)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn failed_replace_keeps_first_pick() {
        let mut ctx = setup_january().await;
        let failures = with_flaky_store(&mut ctx);
        usecase("https://youtu.be/A", Some(15)).execute(&ctx).await.unwrap();

        failures.fail(Some(StoreCall::DeleteSubmission));
        let e = usecase("https://youtu.be/B", Some(15))
            .execute(&ctx)
            .await
            .unwrap_err();
        assert_eq!(
            handle_error(e).to_string(),
            "Something went wrong at my end so I didn't save your pick"
        );

        let stored = ctx
            .repos
            .as_ref()
            .unwrap()
            .submissions
            .find_by_query(&SubmissionQuery::month("Jan 2024".into()).for_user("1".into()).on_day(15))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].song, "https://youtu.be/A");
    }
}
