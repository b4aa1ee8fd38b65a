use super::digest_mail::compose_digest_mail;
use crate::shared::usecase::UseCase;
use seminars_domain::ID;
use seminars_infra::{MailError, SeminarsContext};
use tracing::{error, info};

/// Sends one mail listing every event with registrations
/// since its last registration digest
#[derive(Debug)]
pub struct SendRegistrationDigestUseCase;

#[derive(Debug, PartialEq)]
pub enum RegistrationDigestOutcome {
    Disabled,
    NothingToSend,
    Sent { events: Vec<ID> },
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
    MailTransport(MailError),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRegistrationDigestUseCase {
    type Response = RegistrationDigestOutcome;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendRegistrationDigest";

    async fn execute(&mut self, ctx: &SeminarsContext) -> Result<Self::Response, Self::Errors> {
        let config = &ctx.config.registration_digest;
        if !config.enabled {
            return Ok(RegistrationDigestOutcome::Disabled);
        }

        let events = ctx
            .repos
            .events
            .find_needing_registration_digest()
            .await
            .map_err(|e| {
                error!("Unable to load events for the registration digest. Err: {:?}", e);
                UseCaseErrors::StorageError
            })?;
        if events.is_empty() {
            return Ok(RegistrationDigestOutcome::NothingToSend);
        }

        let now = ctx.sys.get_timestamp_millis();
        let mail = compose_digest_mail(config, &events, now, &ctx.config.timezone);
        ctx.mailer
            .send(&mail)
            .await
            .map_err(UseCaseErrors::MailTransport)?;

        let mut storage_failed = false;
        for event in &events {
            if let Err(e) = ctx
                .repos
                .events
                .set_last_registration_digest_date(&event.id, now)
                .await
            {
                error!(
                    "Unable to store the registration digest date of event: {}. Err: {:?}",
                    event.id, e
                );
                storage_failed = true;
            }
        }
        if storage_failed {
            return Err(UseCaseErrors::StorageError);
        }

        info!("Registration digest sent for {} event(s)", events.len());
        Ok(RegistrationDigestOutcome::Sent {
            events: events.into_iter().map(|e| e.id).collect(),
        })
    }
}
