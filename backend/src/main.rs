//! Pricebook entry-point: loads configuration, picks storage and serves the
//! HTML pages.

mod server;

use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pricebook::config::AppConfig;
use pricebook::inbound::http::session_config::{BuildMode, session_settings_from_env};
use pricebook::outbound::password::BcryptPasswordHasher;
use pricebook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let app_config = AppConfig::load().map_err(|err| eyre!("loading configuration: {err}"))?;
    let bind_addr = app_config.bind_addr()?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("session configuration")?;
    let hasher = BcryptPasswordHasher::new(app_config.bcrypt_cost())?;

    let mut server_config = ServerConfig::new(session, bind_addr, hasher);
    if let Some(database_url) = app_config.database_url() {
        if app_config.run_migrations() {
            let applied = run_pending_migrations(database_url).await?;
            info!(applied, "database schema up to date");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(app_config.db_max_connections()),
        )
        .await?;
        server_config = server_config.with_db_pool(pool);
    }

    info!(%bind_addr, "starting pricebook");
    create_server(server_config)?.await?;
    Ok(())
}
