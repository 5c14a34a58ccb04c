use quantlab::config::AppConfig;
use quantlab::errors::EngineResult;
use quantlab::server;
use quantlab::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("quantlab api starting");

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cfg).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("quantlab api stopped");
}

async fn run(cfg: AppConfig) -> EngineResult<()> {
    let state = AppState::new(cfg.clone());
    tracing::info!(
        model = state.model.name(),
        cors_origins = ?cfg.cors_origins,
        "pricing engine ready"
    );
    let app = server::build_router(state);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
