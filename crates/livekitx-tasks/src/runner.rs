// ABOUTME: Child process invocation with stdio connected to the parent.
// ABOUTME: CommandRunner is the seam tests use to stand in for real processes.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, TaskError};

/// A program and its arguments, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs an invocation to completion and reports its exit code.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32>;
}

/// Runs invocations as real child processes sharing the parent's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32> {
        debug!(command = %invocation, "spawning");

        let status = Command::new(invocation.program())
            .args(invocation.args.iter().map(OsString::as_os_str))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| TaskError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        // Killed by a signal: no code to mirror.
        Ok(status.code().unwrap_or(1))
    }
}

/// Join an option prefix and a path without a lossy string conversion.
pub(crate) fn flag_with_path(prefix: &str, path: &Path) -> OsString {
    let mut flag = OsString::from(prefix);
    flag.push(path.as_os_str());
    flag
}
