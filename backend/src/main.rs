use std::sync::Arc;

use hui_backend::config::BackendConfig;
use hui_backend::domain::LogNotifier;
use hui_backend::scheduler::spawn_reminder_loop;
use hui_backend::{create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BackendConfig::from_env()?;
    info!("Starting with {:?}", config);

    let app_state = initialize_backend(&config)?;
    let reminders = spawn_reminder_loop(
        app_state.reminder_service.clone(),
        Arc::new(LogNotifier),
        config.reminder_tick,
    );

    let app = create_router(app_state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    let served = axum::serve(listener, app).await;
    reminders.abort();
    served?;

    Ok(())
}
