use tracing::info;
use tracing_subscriber::FmtSubscriber;

use landing_api::{app, config::AppConfig, errors::Result, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing::subscriber::set_global_default(FmtSubscriber::default()).unwrap();

    let config = AppConfig::from_env()?;
    let state = AppState::init(config)?;

    info!("Starting server");

    let listener = tokio::net::TcpListener::bind(state.config.listen_addr).await?;
    info!("Serving landing api at http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
