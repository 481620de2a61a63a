//! Runner configuration loading.

use anyhow::{Context, Result};
use outbreak_core::RunnerConfig;
use tracing::info;

/// Path to a JSON `RunnerConfig`
pub const CONFIG_ENV: &str = "OUTBREAK_CONFIG";
/// Overrides the seed from the config file
pub const SEED_ENV: &str = "OUTBREAK_SEED";

pub fn load_config() -> Result<RunnerConfig> {
    let mut config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            RunnerConfig::from_json(&json)
                .with_context(|| format!("invalid config file {}", path))?
        }
        Err(_) => RunnerConfig::default(),
    };

    if let Ok(seed) = std::env::var(SEED_ENV) {
        config.outbreak.seed = parse_seed(&seed)?;
    }

    config.outbreak.validate()?;
    Ok(config)
}

fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("{} must be an unsigned integer, got {:?}", SEED_ENV, raw))
}
