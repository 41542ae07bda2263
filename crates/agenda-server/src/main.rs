use agenda_core::{AgendaConfig, StaticCatalog, SystemClock};
use agenda_planner::Planner;
use agenda_server::{app, state::AppState};
use agenda_session::Sweeper;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CATALOG: &str = "data/catalog.sample.json";

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let json_logs = std::env::var("AGENDA_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    init_tracing(json_logs);

    let mut config = match std::env::var("AGENDA_CONFIG") {
        Ok(path) => AgendaConfig::from_file(&path).with_context(|| format!("loading config {path}"))?,
        Err(_) => AgendaConfig::default(),
    };
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port.parse().with_context(|| format!("invalid PORT {port:?}"))?;
    }

    let catalog_path = std::env::var("AGENDA_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG.to_string());
    let catalog = StaticCatalog::from_file(&catalog_path, &config.event)
        .with_context(|| format!("loading catalog {catalog_path}"))?;
    tracing::info!(sessions = catalog.len(), path = %catalog_path, "catalog loaded");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let store_config = config.store.clone();
    let planner = Arc::new(Planner::new(config, Arc::new(catalog), Arc::new(SystemClock))?);
    let sweeper = Sweeper::new(Arc::clone(planner.store()), &store_config).spawn();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, version = env!("CARGO_PKG_VERSION"), "agenda-server listening");

    axum::serve(listener, app(AppState::new(planner)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}
