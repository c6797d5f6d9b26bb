mod deploy;
mod doctor;
mod plan;

use std::path::Path;

use dockside_core::DocksideConfig;

pub use deploy::deploy;
pub use doctor::doctor;
pub use plan::plan;

/// Load the explicit config file, or `./dockside.toml` falling back to defaults.
pub(crate) fn load_config(config_path: Option<&Path>) -> anyhow::Result<DocksideConfig> {
    let config = match config_path {
        Some(path) => DocksideConfig::load_from(path)?,
        None => DocksideConfig::load(Path::new("."))?,
    };
    Ok(config)
}
