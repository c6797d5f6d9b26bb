use std::process::Stdio;

use dockside_core::CommandLine;

use crate::error::ExecError;

/// Output of a command run with captured stdio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Abstraction over external process execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a command to completion and capture stdout and stderr.
    async fn exec(&self, cmd: &CommandLine) -> Result<Captured, ExecError>;

    /// Run a command to completion, streaming output to the terminal.
    async fn exec_streaming(&self, cmd: &CommandLine) -> Result<(), ExecError>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    async fn exec(&self, cmd: &CommandLine) -> Result<Captured, ExecError> {
        (**self).exec(cmd).await
    }

    async fn exec_streaming(&self, cmd: &CommandLine) -> Result<(), ExecError> {
        (**self).exec_streaming(cmd).await
    }
}

/// Spawns real child processes that inherit the working directory and environment.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn exec(&self, cmd: &CommandLine) -> Result<Captured, ExecError> {
        let output = tokio::process::Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| spawn_error(cmd, e))?;

        // Lossy: `ls` and compilers may print non-UTF-8 file names.
        if output.status.success() {
            Ok(Captured {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            Err(ExecError::CommandFailed {
                command: cmd.to_string(),
                code: output.status.code(),
                output: combined,
            })
        }
    }

    async fn exec_streaming(&self, cmd: &CommandLine) -> Result<(), ExecError> {
        let status = tokio::process::Command::new(&cmd.program)
            .args(&cmd.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| spawn_error(cmd, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::CommandFailed {
                command: cmd.to_string(),
                code: status.code(),
                output: String::new(),
            })
        }
    }
}

fn spawn_error(cmd: &CommandLine, source: std::io::Error) -> ExecError {
    ExecError::Spawn {
        program: cmd.program.clone(),
        source,
    }
}
