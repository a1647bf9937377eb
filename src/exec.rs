//! Subprocess plumbing for the shell capability.
use anyhow::{Context, Result, bail};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output};

/// A fully rendered external command, ready to run or to print in dry-run
/// mode.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ShellCommand {
    /// Start building a command for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Run the command from `dir` instead of the current directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The program name, for diagnostics.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Raw exit code, when the process exited normally.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Run a command and fail on a non-zero exit.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned or exits non-zero.
pub fn run(cmd: &ShellCommand) -> Result<ExecResult> {
    let output = cmd
        .build()
        .output()
        .with_context(|| format!("failed to execute: {}", cmd.program()))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{} failed (exit {}): {}",
            cmd.program(),
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}

/// Run a command, allowing failure (returns the result without bailing).
///
/// # Errors
///
/// Returns an error only if the process cannot be spawned at all.
pub fn run_unchecked(cmd: &ShellCommand) -> Result<ExecResult> {
    let output = cmd
        .build()
        .output()
        .with_context(|| format!("failed to execute: {}", cmd.program()))?;
    Ok(ExecResult::from(output))
}
