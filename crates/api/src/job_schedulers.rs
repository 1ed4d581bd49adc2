use crate::{
    reminder::{
        fire_due_reminders::FireDueRemindersUseCase,
        sweep_overdue_reminders::SweepOverdueRemindersUseCase,
    },
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use std::time::Duration;
use steward_infra::StewardContext;
use tracing::info;

const OVERDUE_SWEEP_BATCH_SIZE: usize = 100;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Fires the due `ReminderSchedule`s at the start of every minute
pub fn start_fire_due_reminders_job(ctx: StewardContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            if let Ok(fired) = execute(FireDueRemindersUseCase, &ctx).await {
                if fired > 0 {
                    info!("Fired {} reminders", fired);
                }
            }
        }
    });
}

pub fn start_overdue_sweep_job(ctx: StewardContext) {
    actix_web::rt::spawn(async move {
        // A zero period makes the interval panic
        let period = ctx.config.overdue_sweep_interval_secs.max(1);
        let mut sweep_interval = interval(Duration::from_secs(period));
        loop {
            sweep_interval.tick().await;
            let usecase = SweepOverdueRemindersUseCase {
                limit: OVERDUE_SWEEP_BATCH_SIZE,
            };
            if let Ok(res) = execute(usecase, &ctx).await {
                if res.escalated > 0 || res.missed > 0 {
                    info!(
                        "Overdue sweep escalated {} and missed {} reminders",
                        res.escalated, res.missed
                    );
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
