#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics on bad input.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use www::config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "www=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    for name in config.missing_settings() {
        tracing::warn!("{name} is not set; the feature depending on it is inactive");
    }

    tracing::info!(
        "Loaded configuration: auth_enabled={}, auth_path_prefix={:?}, algorithm={:?}, listen_port={}",
        config.auth_enabled,
        config.auth_path_prefix,
        config
            .verification_key
            .as_ref()
            .map(www::auth::VerificationKey::algorithm_name),
        config.listen_port
    );

    let listen_port = config.listen_port;
    let app = www::router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
