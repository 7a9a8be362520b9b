mod config;
mod manifest;
mod routes;
mod rpc;
mod services;
mod state;
mod tools;

use std::future::IntoFuture;

use config::Config;
use manifest::loader::IndexLoader;

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    tracing_subscriber::fmt().with_max_level(config.log_level).init();

    let loader = match IndexLoader::from_config(&config) {
        Ok(loader) => loader,
        Err(e) => {
            tracing::error!(error = %e, "failed to build index loader");
            std::process::exit(1);
        }
    };
    let port = config.port;
    let state = state::AppState::new(config, loader);

    // Startup load runs in the background; requests before it lands trigger their own.
    let startup = state.clone();
    tokio::spawn(async move {
        startup.reload().await;
    });

    let poller = state
        .config
        .polling_enabled()
        .then(|| services::reload::spawn_reload_task(state.clone()));

    let app = routes::app(state);
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "design system mcp listening");
    tracing::info!("endpoints: GET /healthz, POST /reload, GET|POST /mcp");

    tokio::select! {
        result = axum::serve(listener, app).into_future() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "server failed");
            }
        }
        () = shutdown_signal() => {
            tracing::info!("shutting down");
        }
    }

    if let Some(poller) = poller {
        poller.abort();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
