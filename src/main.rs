use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use todo_api::config::state::AppState;
use todo_api::core::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    // set up logging
    logging::init_tracing();

    let state: AppState = AppState::from_env()?;

    // Route misconfigurations abort here, before the listener binds
    let app: Router = server::create_app(state.clone())?;

    let listener: TcpListener = server::setup_listener(&state.environment).await?;
    tracing::info!("Server listening on: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
