use anyhow::Context;
use nomads_core::config::AppConfig;
use std::path::Path;

/// Loads configuration from `path`. A missing file yields defaults; a file
/// that exists but fails to parse or validate is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AppConfig::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
}
