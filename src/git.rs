use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// One external invocation: program followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for `git <args...>`.
    pub fn git(args: &[&str]) -> Self {
        Self::new(std::iter::once("git").chain(args.iter().copied()))
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandLine {
    /// Shell-like rendering: tokens with spaces are quoted unless they are flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if token.contains(' ') && !token.starts_with('-') {
                write!(f, "\"{}\"", token)?;
            } else {
                f.write_str(token)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs a command to completion and captures what it printed.
pub trait Runner {
    fn run(&self, cmd: &CommandLine) -> Result<ExecResult>;
}

/// Runs commands as real subprocesses in a fixed directory.
pub struct SystemRunner {
    dir: PathBuf,
}

impl SystemRunner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Runner for SystemRunner {
    fn run(&self, cmd: &CommandLine) -> Result<ExecResult> {
        let Some((program, args)) = cmd.tokens().split_first() else {
            bail!("empty command");
        };

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to run {} in {}", cmd, self.dir.display()))?;

        Ok(ExecResult {
            // Killed by a signal: no exit code to report.
            code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
