mod scenes;

use std::path::PathBuf;

use anyhow::Context as _;
use lumen_engine::config::LumenConfig;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::Runtime;

const CONFIG_ENV: &str = "LUMEN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "lumen.toml";

fn main() -> anyhow::Result<()> {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = LumenConfig::load_or_default(&path)?;

    init_logging(LoggingConfig::from(&config.logging));

    let name = config.scene.as_deref().unwrap_or(scenes::DEFAULT_SCENE);
    let scene = scenes::by_name(name).with_context(|| {
        format!(
            "unknown scene {name:?} (available: {})",
            scenes::NAMES.join(", ")
        )
    })?;

    log::info!("config: {}, scene: {name}", path.display());
    Runtime::run(&config, scene)
}
