use crate::error::BotError;
use crate::shared::{
    dependencies::Dependency,
    usecase::{execute_with_dependencies, DependencyBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpResponse};
use chrono::Datelike;
use promptbot_api_structs::get_prompt::*;
use promptbot_domain::{MonthWindow, PromptDay};
use promptbot_infra::BotContext;
use tracing::error;

fn handle_error(e: UseCaseErrors) -> BotError {
    match e {
        UseCaseErrors::NoActiveMonth => {
            BotError::NotFound("No currently active music month".into())
        }
        UseCaseErrors::PromptNotFound(day) => {
            BotError::NotFound(format!("No prompt found for day {}", day))
        }
        UseCaseErrors::StorageError => BotError::InternalError(
            "Something went wrong at my end so I couldn't look up the prompt".into(),
        ),
    }
}

pub async fn get_prompt_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<BotContext>,
) -> Result<HttpResponse, BotError> {
    let usecase = GetPromptUseCase { day: query.day };

    execute_with_dependencies(usecase, &ctx)
        .await
        .map(|prompt| {
            HttpResponse::Ok().json(APIResponse::new(format!(
                "Prompt for day {}: {}",
                prompt.day, prompt.prompt
            )))
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unavailable(feature) => BotError::Unavailable(feature),
            UseCaseErrorContainer::UseCase(e) => handle_error(e),
        })
}

/// The prompt of a day in the running music month
#[derive(Debug)]
pub struct GetPromptUseCase {
    /// Defaults to today
    pub day: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NoActiveMonth,
    PromptNotFound(i64),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPromptUseCase {
    type Response = PromptDay;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;

        let now = ctx.sys.get_now();
        let day = self.day.unwrap_or_else(|| now.day() as i64);
        let month = repos
            .months
            .find_one(&MonthWindow::containing(now).strictly_current())
            .await
            .map_err(|e| {
                error!("Unable to look up the current music month. Error: {:?}", e);
                UseCaseErrors::StorageError
            })?
            .ok_or(UseCaseErrors::NoActiveMonth)?;

        month
            .prompt(day)
            .cloned()
            .ok_or(UseCaseErrors::PromptNotFound(day))
    }
}

impl DependencyBoundary for GetPromptUseCase {
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
    use crate::shared::test_helpers::{mid_january, setup_at};
    use chrono::{TimeZone, Utc};
    use promptbot_domain::MusicMonth;

    async fn setup_january() -> BotContext {
        let ctx = setup_at(mid_january()).ctx;
        let month = MusicMonth::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            vec![
                PromptDay {
                    day: 1,
                    prompt: "Favorite song".into(),
                },
                PromptDay {
                    day: 15,
                    prompt: "Something loud".into(),
                },
            ],
        )
        .unwrap();
        ctx.repos.as_ref().unwrap().months.insert(&month).await.unwrap();
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn defaults_to_todays_prompt() {
        let ctx = setup_january().await;

        let prompt = GetPromptUseCase { day: None }.execute(&ctx).await.unwrap();
        assert_eq!(prompt.day, 15);
        assert_eq!(prompt.prompt, "Something loud");

        let prompt = GetPromptUseCase { day: Some(1) }.execute(&ctx).await.unwrap();
        assert_eq!(prompt.prompt, "Favorite song");
    }

    #[actix_web::main]
    #[test]
    async fn missing_prompt_and_month() {
        let ctx = setup_january().await;
        assert!(matches!(
            GetPromptUseCase { day: Some(2) }.execute(&ctx).await,
            Err(UseCaseErrors::PromptNotFound(2))
        ));

        let ctx = setup_at(mid_january()).ctx;
        assert!(matches!(
            GetPromptUseCase { day: None }.execute(&ctx).await,
            Err(UseCaseErrors::NoActiveMonth)
        ));
    }
}
