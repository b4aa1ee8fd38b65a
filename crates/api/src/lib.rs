mod digest;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_web::{dev::Server, web, App, HttpServer};
pub use digest::send_registration_digest::{
    RegistrationDigestOutcome, SendRegistrationDigestUseCase,
    UseCaseErrors as RegistrationDigestError,
};
use job_schedulers::{start_mail_notifier_job, start_registration_digest_job};
pub use reminder::mail_notifier::{
    EventReminderReport, MailNotifierReport, MailNotifierUseCase, ReminderOutcome,
    UseCaseErrors as MailNotifierError,
};
use seminars_infra::SeminarsContext;
pub use shared::usecase::{execute, UseCase};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: SeminarsContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.config.port)?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: SeminarsContext) {
        start_mail_notifier_job(context.clone());
        start_registration_digest_job(context);
    }

    fn configure_server(port: usize) -> Result<(Server, u16), std::io::Error> {
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(|| {
            App::new()
                .wrap(TracingLogger::default())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(1)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
