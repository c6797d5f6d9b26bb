use std::path::Path;

use dockside_core::DeployPlan;

pub fn plan(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    print!("{}", DeployPlan::from_config(&config));
    Ok(())
}
