//! External programs (the plugin compiler and the example renderer).
//!
//! Everything goes through [`ToolRunner`] so a build can run against a fake in
//! tests. A non-zero exit is always an error; nothing is retried.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("No program given for {purpose}")]
    EmptyCommand { purpose: &'static str },
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("I/O error talking to `{program}`: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },
    #[error("`{program}` failed with {status}{}", stderr_suffix(.stderr))]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}

/// One external program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Written to the program's standard input, which is then closed
    pub stdin: Option<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            stdin: None,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Splits a configured command line into program and leading arguments.
    pub fn from_command(
        command: &[String],
        cwd: impl AsRef<Path>,
        purpose: &'static str,
    ) -> Result<Self, ToolError> {
        let [program, args @ ..] = command else {
            return Err(ToolError::EmptyCommand { purpose });
        };
        Ok(Self::new(program.clone(), cwd).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
}

pub trait ToolRunner {
    /// Run to completion. Fails on spawn errors and non-zero exit.
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        let program = &invocation.program;
        log::debug!("Running `{invocation}` in {}", invocation.cwd.display());

        let mut child = Command::new(program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: program.clone(),
                source,
            })?;

        if let Some(input) = &invocation.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            // Dropping the handle closes the pipe so the program sees EOF
            match stdin.write_all(input.as_bytes()) {
                Ok(()) => {}
                // The program exited without reading everything; its status says why
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    log::debug!("`{program}` closed stdin early");
                }
                Err(source) => {
                    return Err(ToolError::Io {
                        program: program.clone(),
                        source,
                    });
                }
            }
        }

        let output = child.wait_with_output().map_err(|source| ToolError::Io {
            program: program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ToolError::Failed {
                program: program.clone(),
                status: output.status,
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            log::warn!("`{program}`: {}", stderr.trim());
        }

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
