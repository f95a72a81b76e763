use crate::reminder::send_due_reminders::SendDueRemindersUseCase;
use crate::shared::{
    dependencies::find_unavailable,
    usecase::{execute, DependencyBoundary},
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use promptbot_infra::BotContext;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Delivers due reminders on every tick, starting at the next whole minute.
/// Does nothing unless both the store and the notifier are set up.
pub fn start_send_reminders_job(ctx: BotContext) {
    let usecase = SendDueRemindersUseCase {};
    if let Some(missing) = find_unavailable(&usecase.dependencies(), &ctx) {
        warn!(
            "Not starting the send reminders job because {:?} is not available",
            missing
        );
        return;
    }

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut reminders_interval = interval(ctx.config.reminder_poll_interval);
        reminders_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        send_reminders_on_every_tick(&ctx, reminders_interval).await;
    });
}

/// A tick only starts after the previous one has deleted what it delivered,
/// so a slow delivery can never be read and sent again by the next tick.
async fn send_reminders_on_every_tick(ctx: &BotContext, mut reminders_interval: Interval) {
    loop {
        reminders_interval.tick().await;
        send_reminders(ctx).await;
    }
}

async fn send_reminders(context: &BotContext) {
    let usecase = SendDueRemindersUseCase {};
    if let Ok(report) = execute(usecase, context).await {
        if report.failed > 0 {
            warn!(
                "Failed to deliver {} of {} due reminders",
                report.failed, report.due
            );
        } else if report.delivered > 0 {
            info!("Delivered {} reminders", report.delivered);
        }
    }
}
