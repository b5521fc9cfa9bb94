//! Dashboard Entry Point
//!
//! Composition root: configuration, tracing, gateway selection, startup
//! session resolution and the terminal shell.
//! Uses `anyhow` for startup errors; auth failures are shown as notices.

mod shell;

use std::sync::Arc;

use auth::{
    AuthConfig, AuthController, IdentityGateway, IdentityToolkitGateway, InMemoryIdentityGateway,
    Profile, SessionStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Offline demo account
const DEMO_NAME: &str = "Demo User";
const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "Demo123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout belongs to the shell
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AuthConfig::from_env()?;

    match IdentityToolkitGateway::from_config(&config)? {
        Some(gateway) => {
            tracing::info!(base_url = %config.identity_base_url, "Using identity service");
            run(gateway).await
        }
        None => {
            tracing::info!(
                email = DEMO_EMAIL,
                "No IDENTITY_API_KEY set, using offline identity service"
            );
            let gateway = InMemoryIdentityGateway::new()
                .with_account(DEMO_NAME, DEMO_EMAIL, DEMO_PASSWORD)
                .with_federated_profile(Profile::new("Google Demo", "google.demo@example.com"));
            run(gateway).await
        }
    }
}

async fn run<G>(gateway: G) -> anyhow::Result<()>
where
    G: IdentityGateway,
{
    let store = SessionStore::new();
    let controller = AuthController::new(Arc::new(gateway), store);

    let mut shell = shell::Shell::new(controller.clone());
    shell.print_route();

    let status = controller.resolve_initial_session().await?;
    tracing::info!(status = %status, "Session ready");

    shell.run().await
}
