//! Startup configuration and logging setup

use rh_shared::{AppConfig, LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

pub type Config = AppConfig;

/// Loads `.env` if present, then reads configuration from the environment
pub fn load() -> Config {
    dotenvy::dotenv().ok();
    Config::from_env()
}

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Records emitted
/// through the `log` facade (sqlx statements) are forwarded to tracing.
pub fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

/// Rejects settings that must not reach production
pub fn check(config: &Config) -> anyhow::Result<()> {
    if config.auth.is_using_default_secret() {
        if config.environment.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET is not set; using the development default");
    }
    Ok(())
}
