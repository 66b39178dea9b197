use ferrous_mx_domain::{CliOverrides, Config};
use tracing::error;

/// Loads, applies overrides, then validates; an invalid config never reaches wiring.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;
    config.validate()?;
    Ok(config)
}
