use steward_api::Application;
use steward_infra::{setup_context, Config};
use steward_sdk::StewardSDK;

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, StewardSDK) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let admin = StewardSDK::admin(address.clone(), config.admin_secret_code.clone());
    (TestApp { config, address }, admin)
}
