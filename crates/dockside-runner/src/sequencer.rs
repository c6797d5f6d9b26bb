use std::io::{self, Write};

use dockside_core::{CommandLine, DeployPlan, OutputMode, Step, StepKind};

use crate::error::ExecError;
use crate::executor::{CommandExecutor, RealExecutor};

/// Runs plan steps in order, stopping at the first failure.
pub struct Sequencer<E: CommandExecutor = RealExecutor, W: Write = io::Stdout> {
    executor: E,
    mode: OutputMode,
    out: W,
}

impl Sequencer<RealExecutor, io::Stdout> {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            executor: RealExecutor,
            mode,
            out: io::stdout(),
        }
    }
}

/// Result of a successful run: one line per completed step.
#[derive(Debug, Default)]
pub struct RunReport {
    pub steps: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("step {index}/{total} ({label}) failed")]
pub struct SequenceError {
    pub index: usize,
    pub total: usize,
    pub label: &'static str,
    #[source]
    pub source: ExecError,
}

impl<E: CommandExecutor, W: Write> Sequencer<E, W> {
    pub fn with_executor(executor: E, mode: OutputMode, out: W) -> Self {
        Self {
            executor,
            mode,
            out,
        }
    }

    /// Consume the sequencer and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, plan: &DeployPlan) -> Result<RunReport, SequenceError> {
        let total = plan.len();
        let mut report = RunReport::default();

        for step in plan.steps() {
            tracing::info!(step = step.index, total, command = %step.kind, "{}", step.label);

            let detail = self
                .run_step(step)
                .await
                .map_err(|source| SequenceError {
                    index: step.index,
                    total,
                    label: step.label,
                    source,
                })?;

            report.steps.push(format!(
                "[{index}/{total}] {detail}",
                index = step.index
            ));
        }

        tracing::info!(steps = total, "deploy sequence completed");
        Ok(report)
    }

    async fn run_step(&mut self, step: &Step) -> Result<String, ExecError> {
        match &step.kind {
            StepKind::Message(text) => {
                self.emit(text)?;
                Ok(step.label.to_owned())
            }
            StepKind::Command(cmd) => {
                self.run_command(cmd).await?;
                Ok(step.label.to_owned())
            }
            StepKind::ReplaceContainer { docker, name } => {
                self.replace_container(docker, name).await
            }
        }
    }

    /// Remove `name` only if the probe lists it, so a first-ever run succeeds
    /// without relying on `rm -f` ignoring a missing container.
    async fn replace_container(&mut self, docker: &str, name: &str) -> Result<String, ExecError> {
        let probe = StepKind::container_probe(docker, name);
        let listed = self.executor.exec(&probe).await?;
        let exists = listed.stdout.lines().any(|line| line.trim() == name);

        if exists {
            self.run_command(&StepKind::container_remove(docker, name))
                .await?;
            Ok(format!("removed container {name}"))
        } else {
            tracing::debug!(container = name, "no existing container to remove");
            Ok(format!("no container named {name}"))
        }
    }

    async fn run_command(&mut self, cmd: &CommandLine) -> Result<(), ExecError> {
        self.emit(&format!("$ {cmd}"))?;

        match self.mode {
            OutputMode::Stream => self.executor.exec_streaming(cmd).await,
            OutputMode::Capture => {
                let captured = self.executor.exec(cmd).await?;
                self.out
                    .write_all(captured.stdout.as_bytes())
                    .and_then(|()| self.out.write_all(captured.stderr.as_bytes()))
                    .and_then(|()| self.out.flush())
                    .map_err(|e| ExecError::Output { source: e })
            }
        }
    }

    fn emit(&mut self, line: &str) -> Result<(), ExecError> {
        writeln!(self.out, "{line}")
            .and_then(|()| self.out.flush())
            .map_err(|e| ExecError::Output { source: e })
    }
}
