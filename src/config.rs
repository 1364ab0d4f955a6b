use anyhow::Result;
use common::PracticeRebatePolicy;
use compute::clock::SystemClock;
use compute::comparison::{ComparisonCalculator, DEFAULT_COMPETITOR_NAME};
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::auth::TokenService;
use crate::schemas::AppState;

/// Signing secret used when none is configured and `dev_mode` is on.
pub const DEV_JWT_SECRET: &str = "lenscompare-dev-secret-change-me";

/// Runtime configuration.
///
/// Layered from built-in defaults, an optional `lenscompare.toml` in the
/// working directory and `LENSCOMPARE__*` environment variables, in that order.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    pub competitor_name: String,
    pub practice_rebate_policy: PracticeRebatePolicy,
    pub catalog_cache_ttl_secs: u64,
    /// Allows starting without a `jwt_secret`, signing with [`DEV_JWT_SECRET`].
    pub dev_mode: bool,
}

impl AppConfig {
    /// Load configuration from every source.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("database_url", "sqlite://lenscompare.db?mode=rwc")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("token_ttl_hours", 24_i64)?
            .set_default("competitor_name", DEFAULT_COMPETITOR_NAME)?
            .set_default("practice_rebate_policy", "report_only")?
            .set_default("catalog_cache_ttl_secs", 300_i64)?
            .set_default("dev_mode", false)?
            .add_source(config::File::with_name("lenscompare").required(false))
            .add_source(
                config::Environment::with_prefix("LENSCOMPARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: AppConfig = settings.try_deserialize()?;
        cfg.validate()?;

        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.token_ttl_hours <= 0 {
            anyhow::bail!("token_ttl_hours must be positive");
        }
        if self.competitor_name.trim().is_empty() {
            anyhow::bail!("competitor_name cannot be empty");
        }
        Ok(())
    }

    /// Override the database URL, typically from the command line.
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }

    /// Override the bind address, typically from the command line.
    pub fn with_bind_address(mut self, bind_address: Option<String>) -> Self {
        if let Some(address) = bind_address {
            self.bind_address = address;
        }
        self
    }

    /// Configured JWT secret. Without one, only `dev_mode` may fall back to
    /// the development secret.
    pub fn jwt_secret(&self) -> Result<String> {
        match &self.jwt_secret {
            Some(secret) if !secret.is_empty() => Ok(secret.clone()),
            _ if self.dev_mode => {
                warn!("No jwt_secret configured; dev_mode is on, using the development secret");
                Ok(DEV_JWT_SECRET.to_string())
            }
            _ => anyhow::bail!(
                "jwt_secret is not configured; set LENSCOMPARE__JWT_SECRET or enable LENSCOMPARE__DEV_MODE for local use"
            ),
        }
    }

    pub fn calculator(&self) -> ComparisonCalculator {
        ComparisonCalculator::new(self.competitor_name.clone(), self.practice_rebate_policy)
    }
}

/// Initialize application state from configuration
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let jwt_secret = config.jwt_secret()?;

    // Connect to database
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(100)
        .time_to_live(Duration::from_secs(config.catalog_cache_ttl_secs))
        .build();

    let tokens = TokenService::new(&jwt_secret, config.token_ttl_hours);
    let calculator = config.calculator();
    debug!(
        competitor = calculator.competitor_name(),
        policy = ?calculator.policy(),
        "Comparison calculator configured"
    );

    Ok(AppState {
        db,
        cache,
        tokens,
        calculator: Arc::new(calculator),
        clock: Arc::new(SystemClock),
    })
}
