use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;

use appointment_notification_service::config::Settings;
use appointment_notification_service::delivery::create_delivery_client;
use appointment_notification_service::dispatch::EmailDispatcher;
use appointment_notification_service::postgres::PostgresPool;
use appointment_notification_service::record::create_record_store;
use appointment_notification_service::server::{create_app, AppState};
use appointment_notification_service::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    let _telemetry = init_telemetry(&settings.otel)?;
    tracing::info!(aws = ?settings.aws, "Configuration loaded");

    // Connect to PostgreSQL only when it backs the record store
    let postgres_pool = if settings.store.backend == "postgres" {
        let pool = PostgresPool::new(&settings.database).await?;
        if settings.database.run_migrations {
            pool.run_migrations().await?;
        }
        Some(pool)
    } else {
        None
    };

    let record_store = create_record_store(&settings.store, postgres_pool.as_ref())?;
    let delivery_client = create_delivery_client(&settings.delivery, &settings.aws).await;

    let dispatcher = EmailDispatcher::new(
        delivery_client,
        record_store,
        settings.aws.from_email.clone(),
    );

    // Create application state
    let state = AppState::new(dispatcher);
    tracing::info!(
        delivery_backend = state.dispatcher.delivery_backend(),
        store_backend = state.dispatcher.record_store().backend_type(),
        "Application state initialized"
    );

    // Create Axum app
    let app = create_app(state, &settings.server);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal_handler())
        .await?;

    if let Some(pool) = postgres_pool {
        pool.close().await;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
