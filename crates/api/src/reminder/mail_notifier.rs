use super::reminder_mail::compose_reminder_mail;
use crate::shared::usecase::UseCase;
use futures::future::join_all;
use seminars_domain::{Event, ReminderKind, ID};
use seminars_infra::SeminarsContext;
use tracing::{error, info, warn};

/// Sends the event takes place and cancelation deadline reminders
/// to the organizers of every event a reminder is due for
#[derive(Debug)]
pub struct MailNotifierUseCase;

#[derive(Debug, Clone, PartialEq)]
pub enum ReminderOutcome {
    /// Every organizer got a mail and the reminder is marked as sent
    Sent { mails: usize },
    /// Some organizers got a mail. The reminder is marked as sent so that
    /// nobody gets it twice, the others are not retried.
    PartiallySent {
        mails: usize,
        failed_recipients: Vec<String>,
    },
    SkippedNoOrganizer,
    /// No mail went out, will be retried on the next run
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventReminderReport {
    pub event_id: ID,
    pub kind: ReminderKind,
    pub outcome: ReminderOutcome,
}

#[derive(Debug, Default)]
pub struct MailNotifierReport {
    pub reminders: Vec<EventReminderReport>,
}

impl MailNotifierReport {
    pub fn sent_count(&self) -> usize {
        self.reminders
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    ReminderOutcome::Sent { .. } | ReminderOutcome::PartiallySent { .. }
                )
            })
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.reminders
            .iter()
            .filter(|r| matches!(r.outcome, ReminderOutcome::Failed { .. }))
            .count()
    }
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

const REMINDER_KINDS: [ReminderKind; 2] = [
    ReminderKind::EventTakesPlace,
    ReminderKind::CancelationDeadline,
];

async fn send_reminder(
    kind: ReminderKind,
    event: &Event,
    now: i64,
    ctx: &SeminarsContext,
) -> ReminderOutcome {
    if event.organizers.is_empty() {
        return ReminderOutcome::SkippedNoOrganizer;
    }

    let mails = event
        .organizers
        .iter()
        .map(|organizer| compose_reminder_mail(kind, event, organizer, now, &ctx.config.timezone))
        .collect::<Vec<_>>();

    let results = join_all(mails.iter().map(|mail| ctx.mailer.send(mail))).await;
    let mut failed_recipients = Vec::new();
    let mut errors = Vec::new();
    for (mail, res) in mails.iter().zip(results) {
        if let Err(e) = res {
            failed_recipients.push(mail.to.email.clone());
            errors.push(e.to_string());
        }
    }
    let sent = mails.len() - failed_recipients.len();
    if sent == 0 {
        error!(
            "Unable to send {} reminder for event: {}. Errors: {:?}",
            kind, event.id, errors
        );
        return ReminderOutcome::Failed {
            error: errors.join(", "),
        };
    }

    if let Err(e) = ctx.repos.events.mark_reminder_sent(&event.id, kind).await {
        error!(
            "Sent {} reminder for event: {}, but was unable to store it. Err: {:?}",
            kind, event.id, e
        );
        return ReminderOutcome::Failed {
            error: e.to_string(),
        };
    }

    if failed_recipients.is_empty() {
        ReminderOutcome::Sent { mails: sent }
    } else {
        warn!(
            "{} reminder for event: {} did not reach {:?}. Errors: {:?}",
            kind, event.id, failed_recipients, errors
        );
        ReminderOutcome::PartiallySent {
            mails: sent,
            failed_recipients,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MailNotifierUseCase {
    type Response = MailNotifierReport;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "MailNotifier";

    async fn execute(&mut self, ctx: &SeminarsContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let settings = &ctx.config.reminders;
        let mut report = MailNotifierReport::default();

        for &kind in REMINDER_KINDS.iter() {
            if !settings.is_enabled(kind) {
                continue;
            }

            let candidates = ctx
                .repos
                .events
                .find_by_status(kind.required_status())
                .await
                .map_err(|e| {
                    error!("Unable to load candidates for {} reminders. Err: {:?}", kind, e);
                    UseCaseErrors::StorageError
                })?;

            for event in candidates
                .into_iter()
                .filter(|event| settings.is_due(kind, event, now))
            {
                let outcome = send_reminder(kind, &event, now, ctx).await;
                report.reminders.push(EventReminderReport {
                    event_id: event.id.clone(),
                    kind,
                    outcome,
                });
            }
        }

        info!(
            "{} reminder(s) sent, {} failed",
            report.sent_count(),
            report.failed_count()
        );
        Ok(report)
    }
}
