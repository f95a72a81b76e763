use crate::shared::{
    dependencies::Dependency,
    usecase::{DependencyBoundary, UseCase},
};
use promptbot_infra::BotContext;
use tracing::{error, info, warn};

/// Delivers every `Reminder` that is due and deletes it afterwards.
///
/// A `Reminder` is deleted even when its delivery failed, so that it is
/// never delivered twice by a later run.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

/// How a run went
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
    NotifierUnavailable,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DeliveryReport;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Errors> {
        let repos = ctx.repos.as_ref().ok_or(UseCaseErrors::StorageError)?;
        let notifier = ctx
            .notifier
            .as_ref()
            .ok_or(UseCaseErrors::NotifierUnavailable)?;

        let now = ctx.sys.get_now();
        let reminders = repos.reminders.find_due(now).await.map_err(|e| {
            error!("Unable to get due reminders. Error: {:?}", e);
            UseCaseErrors::StorageError
        })?;

        let mut report = DeliveryReport {
            due: reminders.len(),
            ..Default::default()
        };
        if report.due > 0 {
            info!("Sending {} due reminders", report.due);
        }

        for reminder in reminders {
            match notifier
                .send_direct_message(&reminder.user_id, &reminder.delivery_text())
                .await
            {
                Ok(_) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        "Unable to deliver reminder: {} to user: {}. Error: {:?}",
                        reminder.id, reminder.user_id, e
                    );
                }
            }

            if let Err(e) = repos.reminders.delete(&reminder.id).await {
                error!(
                    "Unable to delete reminder: {} after its delivery. Error: {:?}",
                    reminder.id, e
                );
            }
        }

        Ok(report)
    }
}

impl DependencyBoundary for SendDueRemindersUseCase {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![Dependency::Store, Dependency::Notifier]
    }

    fn feature(&self) -> &'static str {
        "reminders"
    }
}
