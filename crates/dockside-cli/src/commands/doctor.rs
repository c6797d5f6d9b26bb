use std::path::Path;

use dockside_core::DocksideConfig;
use dockside_core::config::CONFIG_FILE_NAME;
use dockside_runner::{CheckResult, Doctor};

pub async fn doctor(config_path: Option<&Path>) -> anyhow::Result<()> {
    let project_dir = Path::new(".");

    // An unreadable config is reported as a failed check, not a hard error.
    let (config, config_check) = match super::load_config(config_path) {
        Ok(config) => {
            let source = match config_path {
                Some(path) => path.display().to_string(),
                None if project_dir.join(CONFIG_FILE_NAME).exists() => {
                    CONFIG_FILE_NAME.to_owned()
                }
                None => "not found, using defaults".to_owned(),
            };
            (config, CheckResult::ok(&source))
        }
        Err(e) => (DocksideConfig::default(), CheckResult::fail(&format!("{e:#}"))),
    };

    let mut report = Doctor::new().check(&config, project_dir).await;
    report.config_file = config_check;

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed; see above for details");
    }

    Ok(())
}
