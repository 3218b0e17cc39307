//! Notebook entry-point: settings, storage, demo data, then the HTTP server.

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notebook::inbound::http::health::HealthState;
use notebook::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use notebook::outbound::persistence::{DbPool, PoolConfig, migrate};
use notebook::server::{ServerConfig, Storage, create_server};
use notebook::settings::NotebookSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        NotebookSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let storage = build_storage(&settings).await?;
    info!(storage = storage.kind(), "storage selected");

    if settings.demo_data() {
        let outcome = storage
            .ensure_demo_data(Arc::new(DefaultClock))
            .await
            .map_err(std::io::Error::other)?;
        info!(
            created = ?outcome.created,
            existing = ?outcome.existing,
            repaired = ?outcome.repaired,
            "demo data ensured"
        );
    } else {
        info!(reason = "disabled", "demo data skipped");
    }

    let config = ServerConfig::new(session.key, session.cookie_secure, session.same_site, bind_addr)
        .with_storage(storage);
    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}

async fn build_storage(settings: &NotebookSettings) -> std::io::Result<Storage> {
    let Some(url) = settings.database_url() else {
        warn!("NOTEBOOK_DATABASE_URL not set; notes are kept in memory");
        return Ok(Storage::memory());
    };

    migrate(url.to_owned())
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(std::io::Error::other)?;
    Ok(Storage::postgres(&pool))
}
