//! Backend entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use medcheck::domain::ports::InteractionOracle;
use medcheck::inbound::http::health::HealthState;
use medcheck::outbound::oracle::{GeminiHttpOracle, GeminiOracleConfig};
use medcheck::outbound::persistence::{DbPool, PoolConfig};
use server::settings::AppSettings;
use server::{ServerConfig, create_server};

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn build_pool(settings: &AppSettings) -> std::io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url.as_deref() else {
        warn!("MEDCHECK_DATABASE_URL not set; patients and checks use fixtures");
        return Ok(None);
    };
    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .map_err(|err| io_error("database pool", err))?;
    Ok(Some(pool))
}

fn build_oracle(settings: &AppSettings) -> std::io::Result<Option<Arc<dyn InteractionOracle>>> {
    let Some(api_key) = settings.oracle_api_key() else {
        warn!("MEDCHECK_ORACLE_API_KEY not set; oracle lookups are disabled");
        return Ok(None);
    };
    let oracle = GeminiHttpOracle::new(GeminiOracleConfig {
        base_url: settings
            .oracle_url()
            .map_err(|err| io_error("oracle settings", err))?,
        model: settings.oracle_model().to_owned(),
        api_key,
        timeout: settings.oracle_timeout(),
    })
    .map_err(|err| io_error("oracle client", err))?;
    Ok(Some(Arc::new(oracle)))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io_error("settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io_error("settings", err))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool) = build_pool(&settings).await? {
        config = config.with_db_pool(pool);
    }
    if let Some(oracle) = build_oracle(&settings)? {
        config = config.with_oracle(oracle);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "medcheck listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
