//! surfsup - A read-only JSON API over the Hawaii weather observation dataset
//!
//! This is the main entry point for the surfsup application.

use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;

use surfsup::schema::verify_schema;
use surfsup::{
    create_router, init_tracing, log_dataset_stats, log_error, AppState, Config, Database,
    Result, SurfsUpError,
};

fn main() -> Result<()> {
    let loaded = Config::load();

    // Tracing comes up before anything can fail so errors reach the log
    let log_level = match &loaded {
        Ok((config, _)) => config.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    init_tracing(&log_level);

    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));

    let (config, database_path) = loaded.map_err(|e| {
        log_error(&e, "loading configuration");
        e
    })?;

    config.validate().map_err(|e| {
        log_error(&e, "validating configuration");
        e
    })?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = config.server.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.build()?;

    runtime.block_on(serve(config, database_path))
}

async fn serve(config: Config, database_path: PathBuf) -> Result<()> {
    info!("Opening dataset: {:?}", database_path);

    let database = Database::connect(&database_path, &config.database)
        .await
        .map_err(|e| {
            log_error(&e, "opening dataset");
            e
        })?;

    verify_schema(&database).await.map_err(|e| {
        log_error(&e, "checking dataset schema");
        e
    })?;

    {
        let mut session = database.session().await?;
        log_dataset_stats(
            &database_path.display().to_string(),
            session.measurement_count().await?,
            session.station_count().await?,
        );
    }

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsUpError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let state = AppState::new_shared(config, database.clone(), database_path);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server is ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    database.close().await;
    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
