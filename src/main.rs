//! ip-verifier - Country allow-list verification API
//!
//! This is the composition root that wires together all the components.

use ip_verifier::adapters::inbound::ApiServer;
use ip_verifier::adapters::outbound::{GeoIpCountryRepository, MaxMindGeoLookup};
use ip_verifier::infrastructure::{shutdown_signal, ShutdownController};
use ip_verifier::{load_config, IpVerifierService};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_ansi(!cfg.is_production())
        .with_span_events(FmtSpan::CLOSE)
        .init();

    // ===== COMPOSITION ROOT =====

    // 1. Open the GeoIP database once; it is shared read-only by all requests
    let geo_lookup = match MaxMindGeoLookup::from_file(&cfg.database.geoip_path) {
        Ok(lookup) => {
            tracing::info!(
                "GeoIP DB loaded from {} ({})",
                cfg.database.geoip_path,
                lookup.database_type()
            );
            Arc::new(lookup)
        }
        Err(e) => {
            tracing::error!(
                "failed to open GeoIP DB from {}: {:?}",
                cfg.database.geoip_path,
                e
            );
            return Err(e.context("failed to open GeoIP database"));
        }
    };

    // 2. Repository and application service
    let repo = Arc::new(GeoIpCountryRepository::new(geo_lookup));
    let service = Arc::new(IpVerifierService::new(repo));

    // 3. Inbound adapter
    let server = ApiServer::new(
        cfg.address(),
        service,
        cfg.server.read_timeout,
        cfg.server.write_timeout,
    );

    let shutdown = ShutdownController::new();
    let server_shutdown = shutdown.clone();

    tracing::info!(
        "starting ip-verifier on {} (environment: {})",
        cfg.address(),
        cfg.server.environment
    );

    let mut server_task = tokio::spawn(async move { server.run(server_shutdown).await });

    tokio::select! {
        res = &mut server_task => {
            // Server exited before any shutdown signal (e.g. bind failure)
            return res?;
        }
        _ = shutdown_signal(shutdown.clone()) => {}
    }

    tracing::info!("shutting down server...");

    match tokio::time::timeout(cfg.server.shutdown_timeout, server_task).await {
        Ok(Ok(Ok(()))) => tracing::info!("server stopped gracefully"),
        Ok(Ok(Err(e))) => tracing::error!("server error during shutdown: {:?}", e),
        Ok(Err(e)) => tracing::error!("server task failed: {}", e),
        Err(_) => tracing::warn!(
            "server forced to shutdown: in-flight requests still running after {:?}",
            cfg.server.shutdown_timeout
        ),
    }

    Ok(())
}
