mod config;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() {
    // A missing .env is normal in production; the environment is authoritative.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,server=debug")))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = config::AppConfig::from_env().expect("invalid configuration");
    if config.discord.is_none() {
        tracing::warn!("Discord OAuth not configured; sign-in disabled");
    }
    if config.webhook_url.is_none() {
        tracing::warn!("APPLICATION_WEBHOOK_URL not set; applications will only be logged");
    }
    let port = config.port;

    let state = state::AppState::new(config);

    // Spawn background sweeps for sessions and idle rate-limit windows.
    let _purge = services::session::spawn_purge_task(state.sessions.clone(), SESSION_PURGE_INTERVAL);
    let _sweep = rate_limit::spawn_sweep_task(state.limiter.clone(), SESSION_PURGE_INTERVAL);

    let app = routes::leptos_app(state).expect("leptos router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "aui-staff listening");
    axum::serve(listener, app).await.expect("server failed");
}
