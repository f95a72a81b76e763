use crate::error::BotError;
use crate::shared::{
    dependencies::Dependency,
    usecase::{execute_with_dependencies, DependencyBoundary, UseCase, UseCaseErrorContainer},
};
use actix_web::{web, HttpResponse};
use promptbot_api_structs::create_reminder::*;
use promptbot_domain::{FormatError, Reminder};
use promptbot_infra::BotContext;
use tracing::error;

fn handle_error(e: UseCaseErrors) -> BotError {
    match e {
        UseCaseErrors::InvalidFormat(_) => BotError::BadClientData(
            "That's not the right date or time format. Example: 5d3h30m for a reminder in 5 days, 3 hours and 30 minutes".into(),
        ),
        UseCaseErrors::StorageError => BotError::InternalError(
            "Something went wrong at my end so I didn't save your reminder".into(),
        ),
    }
}

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<BotContext>,
) -> Result<HttpResponse, BotError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: body.user_id,
        message: body.reminder,
        when: body.when,
    };

    execute_with_dependencies(usecase, &ctx)
        .await
        .map(|reminder| {
            HttpResponse::Created().json(APIResponse::new(format!(
                "Okay, I've set a reminder up to remind you of {}",
                reminder.message
            )))
        })
        .map_err(|e| match e {
            UseCaseErrorContainer::Unavailable(feature) => BotError::Unavailable(feature),
            UseCaseErrorContainer::UseCase(e) => handle_error(e),
        })
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: String,
    pub message: String,
    /// Offset from now like "5d3h30m"
    pub when: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidFormat(FormatError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;

        let reminder = Reminder::from_offset(
            self.user_id.clone(),
            self.message.clone(),
            &self.when,
            ctx.sys.get_now(),
        )
        .map_err(UseCaseErrors::InvalidFormat)?;

        repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|e| {
                error!("Unable to save reminder: {}. Error: {:?}", reminder.id, e);
                UseCaseErrors::StorageError
            })?;
        Ok(reminder)
    }
}

impl DependencyBoundary for CreateReminderUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::Store]
    }

    fn feature(&self) -> &'static str {
        "reminders"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{mid_january, setup_at};
    use chrono::Duration;

    fn usecase(when: &str) -> CreateReminderUseCase {
        CreateReminderUseCase {
            user_id: "1".into(),
            message: "stretch".into(),
            when: when.into(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_due_after_offset() {
        let now = mid_january();
        let ctx = setup_at(now).ctx;

        let reminder = usecase("5d3h30m").execute(&ctx).await.unwrap();
        assert_eq!(
            reminder.remind_at,
            now + Duration::days(5) + Duration::hours(3) + Duration::minutes(30)
        );

        let repos = ctx.repos.as_ref().unwrap();
        let stored = repos
            .reminders
            .find_due(now + Duration::days(6))
            .await
            .unwrap();
        assert_eq!(stored, vec![reminder]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_offset() {
        let ctx = setup_at(mid_january()).ctx;

        for when in ["xd", "5d3x", "soon"] {
            let res = usecase(when).execute(&ctx).await;
            assert!(matches!(res, Err(UseCaseErrors::InvalidFormat(_))));
        }
        let repos = ctx.repos.as_ref().unwrap();
        assert!(repos
            .reminders
            .find_due(mid_january() + Duration::days(365))
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn is_unavailable_without_store() {
        let mut ctx = setup_at(mid_january()).ctx;
        ctx.repos = None;

        let res = execute_with_dependencies(usecase("1h"), &ctx).await;
        match res {
            Err(UseCaseErrorContainer::Unavailable(feature)) => assert_eq!(feature, "reminders"),
            _ => panic!("Expected the usecase to be unavailable"),
        }
    }
}
