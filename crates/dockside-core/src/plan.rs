use std::fmt;

use crate::DocksideConfig;

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Print a fixed line to standard output.
    Message(String),
    /// Run an external command to completion.
    Command(CommandLine),
    /// Remove the named container if it exists; succeed either way.
    ReplaceContainer { docker: String, name: String },
}

impl StepKind {
    /// Read-only lookup listing the container name when it exists.
    ///
    /// The anchored filter keeps `foo` from matching `foo-old`.
    pub fn container_probe(docker: &str, name: &str) -> CommandLine {
        CommandLine::new(
            docker,
            [
                "ps".to_owned(),
                "-a".to_owned(),
                "--filter".to_owned(),
                format!("name=^/{name}$"),
                "--format".to_owned(),
                "{{.Names}}".to_owned(),
            ],
        )
    }

    pub fn container_remove(docker: &str, name: &str) -> CommandLine {
        CommandLine::new(docker, ["rm", "-f", name])
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(text) => write!(f, "echo '{text}'"),
            Self::Command(cmd) => write!(f, "{cmd}"),
            Self::ReplaceContainer { docker, name } => {
                write!(f, "{}", Self::container_remove(docker, name))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position in the plan.
    pub index: usize,
    pub label: &'static str,
    pub kind: StepKind,
}

/// The fixed, ordered deploy sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    steps: Vec<Step>,
}

impl DeployPlan {
    /// Build the nine-step plan from configuration.
    pub fn from_config(config: &DocksideConfig) -> Self {
        let go = config.tools.go.as_str();
        let docker = config.tools.docker.as_str();
        let image = config.image_tag();
        let container = config.container_name();
        let port_mapping = format!(
            "{host}:{inner}",
            host = config.container.host_port,
            inner = config.container.container_port,
        );

        let kinds = [
            (
                "print timestamp",
                StepKind::Command(CommandLine::new("date", Vec::<String>::new())),
            ),
            ("greet", StepKind::Message(config.project.greeting.clone())),
            (
                "list working directory",
                StepKind::Command(CommandLine::new("ls", ["-la"])),
            ),
            (
                "create build directory",
                StepKind::Command(CommandLine::new(
                    "mkdir",
                    ["-p", config.build.output_dir.as_str()],
                )),
            ),
            (
                "synchronize dependencies",
                StepKind::Command(CommandLine::new(go, ["mod", "tidy"])),
            ),
            (
                "compile application",
                StepKind::Command(CommandLine::new(
                    go,
                    ["build".to_owned(), "-o".to_owned(), config.binary_path()],
                )),
            ),
            (
                "build image",
                StepKind::Command(CommandLine::new(
                    docker,
                    [
                        "build",
                        "-t",
                        image,
                        "-f",
                        config.image.dockerfile.as_str(),
                        config.image.context.as_str(),
                    ],
                )),
            ),
            (
                "remove previous container",
                StepKind::ReplaceContainer {
                    docker: docker.to_owned(),
                    name: container.to_owned(),
                },
            ),
            (
                "start container",
                StepKind::Command(CommandLine::new(
                    docker,
                    [
                        "run".to_owned(),
                        "-d".to_owned(),
                        format!("--restart={}", config.container.restart),
                        "--name".to_owned(),
                        container.to_owned(),
                        "-p".to_owned(),
                        port_mapping,
                        image.to_owned(),
                    ],
                )),
            ),
        ];

        let steps = kinds
            .into_iter()
            .enumerate()
            .map(|(i, (label, kind))| Step {
                index: i + 1,
                label,
                kind,
            })
            .collect();

        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for DeployPlan {
    fn default() -> Self {
        Self::from_config(&DocksideConfig::default())
    }
}

impl fmt::Display for DeployPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.steps.len();
        for step in &self.steps {
            writeln!(
                f,
                "[{index}/{total}] {label}: {kind}",
                index = step.index,
                label = step.label,
                kind = step.kind,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_whitespace_and_empty_args() {
        let cmd = CommandLine::new("echo", ["plain", "two words", ""]);
        assert_eq!(cmd.to_string(), "echo plain 'two words' ''");
    }

    #[test]
    fn display_without_args_is_program() {
        let cmd = CommandLine::new("date", Vec::<String>::new());
        assert_eq!(cmd.to_string(), "date");
    }

    #[test]
    fn container_probe_anchors_name() {
        let probe = StepKind::container_probe("docker", "api");
        assert!(probe.args.contains(&"name=^/api$".to_owned()));
        assert_eq!(probe.args[0], "ps");
    }

    #[test]
    fn plan_display_numbers_every_step() {
        let rendered = DeployPlan::default().to_string();
        assert_eq!(rendered.lines().count(), 9);
        assert!(rendered.starts_with("[1/9] print timestamp: date"));
        assert!(rendered.contains("[2/9] greet: echo 'hello dockside'"));
        assert!(rendered.contains("[8/9] remove previous container: docker rm -f"));
    }

    // ── Property-based tests ──

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy: docker-safe name (lowercase ascii + hyphens, 1-20 chars)
        fn name() -> impl Strategy<Value = String> {
            "[a-z][a-z0-9-]{0,19}".prop_filter("no trailing hyphen", |s| !s.ends_with('-'))
        }

        fn config(name: String, host_port: u16, container_port: u16) -> DocksideConfig {
            let mut config = DocksideConfig::default();
            config.project.name = name;
            config.container.host_port = host_port;
            config.container.container_port = container_port;
            config
        }

        proptest! {
            #[test]
            fn plan_always_has_nine_ordered_steps(
                name in name(),
                host_port in 1u16..=u16::MAX,
                container_port in 1u16..=u16::MAX,
            ) {
                let plan = DeployPlan::from_config(&config(name, host_port, container_port));
                prop_assert_eq!(plan.len(), 9);
                for (i, step) in plan.steps().iter().enumerate() {
                    prop_assert_eq!(step.index, i + 1);
                }
            }

            #[test]
            fn start_step_maps_configured_ports(
                name in name(),
                host_port in 1u16..=u16::MAX,
                container_port in 1u16..=u16::MAX,
            ) {
                let plan = DeployPlan::from_config(&config(name.clone(), host_port, container_port));
                let StepKind::Command(run) = &plan.steps()[8].kind else {
                    return Err(TestCaseError::fail("last step is not a command"));
                };
                let mapping = format!("{host_port}:{container_port}");
                prop_assert!(run.args.contains(&mapping));
                prop_assert_eq!(run.args.last(), Some(&name));
            }

            #[test]
            fn removal_and_start_share_container_name(name in name()) {
                let plan = DeployPlan::from_config(&config(name.clone(), 8001, 8001));
                let StepKind::ReplaceContainer { name: removed, .. } = &plan.steps()[7].kind else {
                    return Err(TestCaseError::fail("step 8 is not a container removal"));
                };
                prop_assert_eq!(removed, &name);
            }
        }
    }
}
