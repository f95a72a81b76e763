use crate::error::BotError;
use crate::shared::{
    dependencies::Dependency,
    usecase::{execute_with_dependencies, DependencyBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpResponse};
use promptbot_api_structs::get_month::*;
use promptbot_domain::{MonthStatus, MonthWindow, MusicMonth};
use promptbot_infra::BotContext;
use tracing::error;

fn handle_error(e: UseCaseErrors) -> BotError {
    match e {
        UseCaseErrors::NotFound => BotError::NotFound("No music month planned".into()),
        UseCaseErrors::StorageError => BotError::InternalError(
            "Something went wrong at my end so I couldn't look up the music month".into(),
        ),
    }
}

/// Lists the prompts of the month, headed by whether it is running or
/// still to come
fn format_month(month: &MusicMonth, status: MonthStatus) -> String {
    let mut content = match status {
        MonthStatus::Upcoming => format!(
            "There's no current music month; the next begins on {}\n",
            month.pretty_start()
        ),
        MonthStatus::Current => "Current music month: \n".to_string(),
    };
    content.push_str("```");
    for line in month.prompt_lines() {
        content.push_str(&line);
        content.push('\n');
    }
    content.push_str("```");
    content
}

pub async fn get_month_controller(ctx: web::Data<BotContext>) -> Result<HttpResponse, BotError> {
    let usecase = GetMonthUseCase {};

    execute_with_dependencies(usecase, &ctx)
        .await
        .map(|(month, status)| HttpResponse::Ok().json(APIResponse::new(format_month(&month, status))))
        .map_err(|e| match e {
            UseCaseErrorContainer::Unavailable(feature) => BotError::Unavailable(feature),
            UseCaseErrorContainer::UseCase(e) => handle_error(e),
        })
}

/// Finds the running music month, or the next one if none is running
#[derive(Debug)]
pub struct GetMonthUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMonthUseCase {
    type Response = (MusicMonth, MonthStatus);

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;

        let window = MonthWindow::containing(ctx.sys.get_now());
        let month = repos
            .months
            .find_one(&window.upcoming_or_current())
            .await
            .map_err(|e| {
                error!("Unable to look up the upcoming music month. Error: {:?}", e);
                UseCaseErrors::StorageError
            })?
            .ok_or(UseCaseErrors::NotFound)?;

        let status = window.status_of(&month);
        Ok((month, status))
    }
}

impl DependencyBoundary for GetMonthUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::Store]
    }

    fn feature(&self) -> &'static str {
        "music months"
    }
}
