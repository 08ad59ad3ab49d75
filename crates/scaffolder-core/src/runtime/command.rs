//! External command execution with inherited standard streams
//!
//! The package manager is an opaque external process. Everything the
//! scaffolder needs from it goes through [`CommandRunner`], which runs a
//! command to completion and reports its exit status.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command as TokioCommand;

/// A fully specified external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory the command runs in
    pub cwd: PathBuf,
}

impl ExternalCommand {
    /// Command running `program` with no arguments inside `cwd`
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status of a finished command (`None` when killed by a signal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    /// Status of a process that exited with `code`
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Whether the process exited with code 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "a signal"),
        }
    }
}

/// Failure of an external command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to launch `{command}`")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` terminated with {status}")]
    Failed {
        command: String,
        status: CommandStatus,
    },
}

/// Capability to run an external command with the caller's standard streams
pub trait CommandRunner {
    fn run(&self, command: &ExternalCommand)
        -> impl Future<Output = io::Result<CommandStatus>> + Send;
}

/// Run a command and turn a launch failure or non-zero exit into a [`CommandError`]
pub async fn run_checked<R: CommandRunner>(
    runner: &R,
    command: &ExternalCommand,
) -> Result<(), CommandError> {
    tracing::info!(command = %command, cwd = %command.cwd.display(), "running external command");

    let status = runner
        .run(command)
        .await
        .map_err(|source| CommandError::Launch {
            command: command.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(CommandError::Failed {
            command: command.to_string(),
            status,
        })
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ExternalCommand) -> io::Result<CommandStatus> {
        let status = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
