use std::path::Path;

use dockside_core::DeployPlan;
use dockside_runner::Sequencer;

/// Run the fixed deploy sequence, stopping at the first failed step.
pub async fn deploy(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let plan = DeployPlan::from_config(&config);

    tracing::info!(
        project = %config.project.name,
        steps = plan.len(),
        "starting deploy sequence"
    );

    let mut sequencer = Sequencer::new(config.output.mode);
    let report = sequencer.run(&plan).await?;

    for line in &report.steps {
        tracing::debug!("{line}");
    }

    println!();
    println!(
        "Deployed: container {name} from image {tag} on port {port}",
        name = config.container_name(),
        tag = config.image_tag(),
        port = config.container.host_port,
    );

    Ok(())
}
