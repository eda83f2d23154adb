use analysis_service::{AppConfig, AppState, create_router};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    info!(?config, "loaded configuration");

    let app = create_router(AppState::from_config(&config)?);

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    match &config.tls {
        Some(tls) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "failed to install rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

            info!("Server listening on https://{}", config.bind_addr);
            axum_server::bind_rustls(config.bind_addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("Server listening on http://{}", config.bind_addr);
            axum_server::bind(config.bind_addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
