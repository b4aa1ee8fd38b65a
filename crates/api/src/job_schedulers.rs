use crate::{
    digest::send_registration_digest::{RegistrationDigestOutcome, SendRegistrationDigestUseCase},
    reminder::mail_notifier::MailNotifierUseCase,
    shared::usecase::execute,
};
use actix_web::rt::time::{interval_at, Instant, Interval};
use seminars_infra::SeminarsContext;
use std::time::Duration;
use tracing::info;

/// Seconds until the next multiple of `interval_secs` since the unix epoch,
/// so that a job with an hourly interval runs at full hours
pub fn get_start_delay(now_ts: i64, interval_secs: u64) -> u64 {
    if interval_secs == 0 {
        return 0;
    }
    let now_secs = (now_ts.max(0) / 1000) as u64;
    interval_secs - now_secs % interval_secs
}

fn job_interval(ctx: &SeminarsContext, interval_secs: u64) -> Interval {
    let now = ctx.sys.get_timestamp_millis();
    let start = Instant::now() + Duration::from_secs(get_start_delay(now, interval_secs));
    interval_at(start, Duration::from_secs(interval_secs))
}

pub fn start_mail_notifier_job(ctx: SeminarsContext) {
    actix_web::rt::spawn(async move {
        let mut interval = job_interval(&ctx, ctx.config.mail_notifier_interval_secs);
        loop {
            interval.tick().await;
            let _ = execute(MailNotifierUseCase, &ctx).await;
        }
    });
}

pub fn start_registration_digest_job(ctx: SeminarsContext) {
    if !ctx.config.registration_digest.enabled {
        info!("Registration digest is disabled");
        return;
    }

    actix_web::rt::spawn(async move {
        let mut interval = job_interval(&ctx, ctx.config.registration_digest.interval_secs);
        loop {
            interval.tick().await;
            if let Ok(RegistrationDigestOutcome::Sent { events }) =
                execute(SendRegistrationDigestUseCase, &ctx).await
            {
                info!("Registration digest listed {} event(s)", events.len());
            }
        }
    });
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 60), 10);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(59 * 1000, 60), 1);
        assert_eq!(get_start_delay(59 * 1000 + 999, 60), 1);
        assert_eq!(get_start_delay(3599 * 1000, 60 * 60), 1);
        assert_eq!(get_start_delay(0, 60 * 60 * 24), 60 * 60 * 24);
        assert_eq!(get_start_delay(1613862000000, 60 * 60), 60 * 60);
        assert_eq!(get_start_delay(1613862000000, 60 * 60 * 24), 60 * 60);
        assert_eq!(get_start_delay(1000, 0), 0);
    }
}
