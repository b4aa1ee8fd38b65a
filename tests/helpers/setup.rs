use seminars_api::Application;
use seminars_infra::{InMemoryMailer, SeminarsContext, StaticTimeSys};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub ctx: SeminarsContext,
    pub mailer: Arc<InMemoryMailer>,
}

/// Context with inmemory repositories, a recording mailer and a clock frozen at `now`
pub fn setup_context(now: i64) -> (SeminarsContext, Arc<InMemoryMailer>) {
    let mailer = Arc::new(InMemoryMailer::new());
    let mut ctx = SeminarsContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.mailer = mailer.clone();
    (ctx, mailer)
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let (mut ctx, mailer) = setup_context(0);
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        ctx,
        mailer,
    }
}
