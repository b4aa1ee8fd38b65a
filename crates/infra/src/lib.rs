mod config;
mod repos;
mod services;
mod system;

pub use config::{
    Config, ConfigSource, RegistrationDigestConfig, SmtpConfig, DEFAULT_DIGEST_SUBJECT,
    DEFAULT_DIGEST_TEMPLATE,
};
pub use repos::{IEventRepo, InMemoryEventRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::error;

#[derive(Clone)]
pub struct SeminarsContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

impl SeminarsContext {
    fn create(config: Config) -> Self {
        let mailer: Arc<dyn IMailer> = match &config.smtp {
            Some(smtp) => match SmtpMailer::new(smtp) {
                Ok(mailer) => Arc::new(mailer),
                Err(e) => {
                    error!(
                        "Unable to set up the SMTP mailer, mails will only be logged. Err: {:?}",
                        e
                    );
                    Arc::new(InMemoryMailer::new())
                }
            },
            None => Arc::new(InMemoryMailer::new()),
        };

        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        }
    }

    /// Context with default settings, inmemory repositories and an inmemory mailer
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::from_source(&ConfigSource::default()),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailer::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> SeminarsContext {
    SeminarsContext::create(Config::from_env())
}
