use std::sync::Arc;

use broker_intake::config::ServerConfig;
use broker_intake::intake::{DialogueEngine, InMemorySessionStore, IntakeService};
use broker_intake::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;

    eprintln!("Broker intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat API: http://{}:{}/chat", config.host, config.port);
    eprintln!("   Static:   {}", config.static_dir.display());
    eprintln!(
        "   CORS:     {}",
        if config.cors_origins.is_empty() {
            "any origin".to_string()
        } else {
            config.cors_origins.join(", ")
        }
    );

    // Sessions live for the lifetime of the process.
    let store = InMemorySessionStore::new();
    let service = Arc::new(IntakeService::new(store, DialogueEngine::default()));
    web::serve(&config, service).await?;

    Ok(())
}
