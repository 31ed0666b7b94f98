/**
 * DASHBOARD KERNEL - Point d'entrée du serveur API
 *
 * RÔLE : Bootstrap : .env, logging, config, roster, RNG, horloge, puis HTTP.
 *
 * ARCHITECTURE : Un seul composant sans état mutable partagé hormis le RNG.
 * Chaque requête génère ses données à la volée, rien n'est persisté.
 * UTILITÉ : Backend de démo pour le frontend du dashboard de métriques.
 */

mod alerts;
mod clock;
mod config;
mod error;
mod export;
mod health;
mod http;
mod metrics;
mod models;
mod state;
mod tasks;
mod users;

use crate::config::load_config;
use crate::http::AppState;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = load_config().await;

    // fabrique l'état unique pour Axum
    let app_state = AppState::new(&cfg);
    tracing::info!(
        users = app_state.users.len(),
        seeded = app_state.rng_seeded,
        utc_offset = %app_state.clock.offset(),
        "dashboard state ready"
    );

    // HTTP
    let app = http::build_router(app_state);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(e) => {
            // sans gestionnaire de signal on tourne jusqu'à l'arrêt du process
            tracing::warn!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
