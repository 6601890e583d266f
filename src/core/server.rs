// Application server configuration and setup

use std::time::Duration;

use anyhow::Result;
use axum::{error_handling::HandleErrorLayer, extract::DefaultBodyLimit, Router};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tower::{timeout::TimeoutLayer, ServiceBuilder};

use crate::api::todos;
use crate::config::environment::EnvironmentVariables;
use crate::config::state::AppState;
use crate::core::routing::RouteGroup;
use crate::utils::error_handler::{fallback_handler, handle_global_error};

/// Creates and configures the application router with all middleware layers.
///
/// This is the single composition point: the api group is constructed,
/// populated, and mounted here. Route misconfigurations (duplicate bindings,
/// a group nobody registered on) surface through the returned error and
/// abort startup.
pub fn create_app(state: AppState) -> Result<Router> {
    let timeout_seconds: u64 = state.environment.default_timeout_seconds;
    let max_body_size: usize = state.environment.max_request_body_size;

    let api: RouteGroup<AppState> = RouteGroup::new("api", "/api")?;
    let api: RouteGroup<AppState> = todos::register(api)?;

    let app: Router = api
        .mount(Router::new())?
        .fallback(fallback_handler)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_global_error))
                .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(state);

    Ok(app)
}

/// Sets up the TCP listener from environment or binds to new address
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = format!("{}:{}", env.host, env.port);
            TcpListener::bind(&addr).await?
        }
    };

    Ok(listener)
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate: std::future::Pending<()> = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }
}
