use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_core::{CoreConfig, UserStore};

/// Main entry point for the users service
///
/// Starts the REST server on `0.0.0.0:<PORT>` over a fresh, empty in-memory store. All data is
/// discarded when the process exits.
///
/// # Environment Variables
/// - `PORT`: listening port (default: 3000)
/// - `RUST_LOG`: tracing filter directives (default adds `users_run=info,api_rest=info`)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `PORT` is not a valid port number,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("users_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env_value(std::env::var("PORT").ok())?;

    tracing::info!("++ Starting users service on {}", cfg.bind_addr());

    api_rest::serve(&cfg, UserStore::new()).await
}
