//! Failures of external tools (`sgdisk`, `mdadm`, `lvcreate`, `grub-install`, ...).

use std::process::Output;

pub const DEFAULT_DESCRIPTION: &str = "Unexpected error while running command.";

const PLACEHOLDER: &str = "-";

/// A command that ran and failed.
///
/// Every detail is kept as a typed field next to the rendered message, so a
/// caller can branch on [`exit_code`](Self::exit_code) or forward
/// [`stderr`](Self::stderr) without re-parsing the text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProcessExecutionError {
    cmd: Option<String>,
    exit_code: Option<i32>,
    stdout: Option<String>,
    stderr: Option<String>,
    description: Option<String>,
    message: String,
}

impl ProcessExecutionError {
    pub fn builder() -> ProcessExecutionErrorBuilder {
        ProcessExecutionErrorBuilder::default()
    }

    /// Builds the error from a finished [`std::process::Command`].
    ///
    /// The exit code is absent when the process was terminated by a signal.
    pub fn from_output(cmd: impl Into<String>, output: &Output) -> Self {
        let mut builder = Self::builder()
            .cmd(cmd)
            .stdout(String::from_utf8_lossy(&output.stdout))
            .stderr(String::from_utf8_lossy(&output.stderr));
        if let Some(code) = output.status.code() {
            builder = builder.exit_code(code);
        }
        builder.build()
    }

    pub fn cmd(&self) -> Option<&str> {
        self.cmd.as_deref()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    pub fn stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }

    /// The description given by the raising site, not the rendered default.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Default, Clone)]
pub struct ProcessExecutionErrorBuilder {
    cmd: Option<String>,
    exit_code: Option<i32>,
    stdout: Option<String>,
    stderr: Option<String>,
    description: Option<String>,
}

impl ProcessExecutionErrorBuilder {
    pub fn cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = Some(cmd.into());
        self
    }

    /// Joins an argv with single spaces.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.cmd = Some(joined);
        self
    }

    pub fn exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    pub fn stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    pub fn stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> ProcessExecutionError {
        let message = render(&self);
        ProcessExecutionError {
            cmd: self.cmd,
            exit_code: self.exit_code,
            stdout: self.stdout,
            stderr: self.stderr,
            description: self.description,
            message,
        }
    }
}

fn render(details: &ProcessExecutionErrorBuilder) -> String {
    let description = details.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
    let cmd = details.cmd.as_deref().unwrap_or(PLACEHOLDER);
    let exit_code = details
        .exit_code
        .map_or_else(|| PLACEHOLDER.to_string(), |code| code.to_string());
    format!(
        "{description}\nCommand: {cmd}\nExit code: {exit_code}\nStdout: {}\nStderr: {}",
        quoted(details.stdout.as_deref()),
        quoted(details.stderr.as_deref()),
    )
}

// Debug formatting escapes control characters, keeping the template five lines.
fn quoted(stream: Option<&str>) -> String {
    stream.map_or_else(|| PLACEHOLDER.to_string(), |s| format!("{s:?}"))
}
