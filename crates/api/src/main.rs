use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use superfix_api::app::{bootstrap_admin, build_router};
use superfix_api::config::ServerConfig;
use superfix_api::notifications::NotificationDispatcher;
use superfix_api::state::AppState;
use superfix_events::{EmailTemplates, EventBus, Mailer, SmtpMailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "superfix_api=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        email_enabled = config.email.is_some(),
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = superfix_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    superfix_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    superfix_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if let Some(bootstrap) = &config.admin_bootstrap {
        match bootstrap_admin(&pool, bootstrap).await {
            Ok(true) => tracing::info!(username = %bootstrap.username, "Bootstrap admin created"),
            Ok(false) => tracing::debug!(username = %bootstrap.username, "Bootstrap admin exists"),
            Err(e) => tracing::error!(error = %e, "Failed to create bootstrap admin"),
        }
    }

    // --- Notifications ---
    let mailer: Option<Arc<dyn Mailer>> = match &config.email {
        Some(email) => match SmtpMailer::new(email) {
            Ok(smtp) => Some(Arc::new(smtp)),
            Err(e) => {
                tracing::error!(error = %e, "Invalid email configuration, email disabled");
                None
            }
        },
        None => None,
    };
    let ops_address = config.email.as_ref().and_then(|e| e.ops_address.clone());

    let templates = EmailTemplates::new().expect("Email templates failed to compile");

    let event_bus = Arc::new(EventBus::default());
    let dispatcher = NotificationDispatcher::new(templates, mailer, ops_address);
    let dispatcher_handle = tokio::spawn(dispatcher.run(event_bus.subscribe()));
    tracing::info!("Notification dispatcher started");

    // --- App ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        pool,
        config: Arc::new(config),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router held the last other reference to the bus; dropping ours
    // closes the channel and lets the dispatcher drain and exit.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), dispatcher_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
