use item_store::{
    config::Config,
    create_app,
    db::{ItemStore, MemoryItemStore, PgItemStore},
};
use std::panic;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Load configuration
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_tracing(&config);

    info!("Starting server...");
    match &loaded {
        Ok(_) => info!("Configuration loaded successfully"),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            warn!("Using default configuration");
        }
    }

    match &config.db_url {
        Some(db_url) => {
            let store = Arc::new(PgItemStore::connect(db_url, &config.pool_settings()).await?);
            store.ensure_schema().await?;
            info!("Database initialized successfully");

            let served = serve(&config, Arc::clone(&store)).await;
            store.close().await;
            served?;
        }
        None => {
            warn!("No database URL configured - items are kept in memory and lost on exit");
            serve(&config, Arc::new(MemoryItemStore::new())).await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "item_store={level},tower_http=debug,axum::rejection=trace,{level}",
            level = config.log_level
        )
        .into()
    });

    // JSON lines in production, human-readable output everywhere else
    let (json_layer, pretty_layer) = if config.is_production() {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();
}

async fn serve<S: ItemStore>(config: &Config, store: Arc<S>) -> std::io::Result<()> {
    let app = create_app(store);

    let listener = tokio::net::TcpListener::bind(config.server_address()).await?;

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📚 Swagger UI available at http://{}/swagger", config.server_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    info!("Shutdown signal received, draining connections");
}
