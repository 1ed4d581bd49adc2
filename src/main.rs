mod telemetry;

use steward_api::Application;
use steward_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("steward_server".into(), "info".into());
    init_subscriber(subscriber);

    if let Err(e) = run_migration().await {
        error!("Unable to run the database migrations. Err: {:?}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
