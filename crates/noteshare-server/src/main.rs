//! Entry point for the noteshare-server binary.

use axum::middleware;
use noteshare_server::{
    auth,
    config::ServerConfig,
    middleware::request_id::{propagate_request_id, request_id_layer},
    routes,
    state::AppState,
};
use noteshare_store::{NewUser, Store, StoreConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting noteshare-server");
    tracing::info!(
        "Configuration: port={}, log_level={}, upload_dir={}",
        config.port,
        config.log_level,
        config.upload_dir
    );

    // Connect to database
    let store_config = StoreConfig::from_env()?;
    let store = Store::connect(store_config).await?;

    // Seed the first account if the users table is empty
    ensure_bootstrap_user(&store, &config).await?;

    // Build application state
    let state = AppState::new(store, config.clone());

    // Build router with middleware
    let app = routes::build_router(state)
        .layer(middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    // Create listener
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Permissive CORS for browser clients.
fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the seed account when no users exist yet.
///
/// Password accounts are only created here or linked through Google
/// sign-in; there is no registration endpoint.
async fn ensure_bootstrap_user(
    store: &Store,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if store.has_users().await? {
        return Ok(());
    }

    let (Some(username), Some(email), Some(password)) = (
        config.bootstrap_username.as_ref(),
        config.bootstrap_email.as_ref(),
        config.bootstrap_password.as_ref(),
    ) else {
        tracing::warn!(
            "No users exist and BOOTSTRAP_USERNAME/BOOTSTRAP_EMAIL/BOOTSTRAP_PASSWORD \
             are not set; only Google sign-in can create accounts"
        );
        return Ok(());
    };

    let password_hash = auth::hash_password(password)
        .map_err(|e| format!("Failed to hash bootstrap password: {}", e))?;

    let user = store
        .insert_user(&NewUser::with_password(
            username.clone(),
            email.clone(),
            password_hash,
        ))
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap user created");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
