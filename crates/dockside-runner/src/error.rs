#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("`{program}` could not be started; is it installed and on PATH?")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{command}` failed ({}){}", describe_code(*code), format_output(output))]
    CommandFailed {
        command: String,
        /// `None` when the process was killed by a signal.
        code: Option<i32>,
        /// Captured stdout and stderr; empty when output was streamed.
        output: String,
    },

    #[error("failed to write step output")]
    Output { source: std::io::Error },
}

impl ExecError {
    /// Exit code of the failed command, if it ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
