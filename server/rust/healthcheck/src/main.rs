use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use hri_healthcheck_server::adapter::handler::{self, AppState};
use hri_healthcheck_server::infrastructure::config::Config;
use hri_healthcheck_server::infrastructure::probes::ConfiguredProbeFactory;
use hri_healthcheck_server::infrastructure::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    telemetry::init_logger(&cfg.log);

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        elastic_url = %cfg.elastic.url,
        kafka_brokers = %cfg.kafka.bootstrap_servers(),
        "starting healthcheck server"
    );

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    let probes = Arc::new(ConfiguredProbeFactory::new(cfg.elastic, cfg.kafka));
    let app = handler::router(AppState::new(probes));

    info!("REST server starting on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
