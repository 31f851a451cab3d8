//! External tool execution.
//!
//! `ToolRunner` is the seam between the band-combination workflow and the GDAL
//! command-line utilities. `SystemRunner` spawns real processes; tests provide
//! their own implementation and assert on the recorded invocations.
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// A program name plus its argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
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

    /// Shell-like rendering for log messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a finished tool exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }

    /// Turn a non-zero exit into `Error::ToolFailed`
    pub fn check(self, invocation: &ToolInvocation) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                tool: invocation.program.clone(),
                code: self.code,
            })
        }
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

pub trait ToolRunner {
    /// Run to completion with output passed straight through to the console
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolStatus>;

    /// Run to completion, handing each line of merged stdout/stderr to
    /// `on_line` as soon as it is read, in the order the tool wrote them
    fn run_streaming(
        &mut self,
        invocation: &ToolInvocation,
        on_line: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<ToolStatus>;
}

/// Spawns the tools as child processes found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &ToolInvocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command
    }

    fn spawn_error(invocation: &ToolInvocation, source: std::io::Error) -> Error {
        Error::ToolSpawn {
            tool: invocation.program.clone(),
            source,
        }
    }
}

impl ToolRunner for SystemRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolStatus> {
        debug!("Running: {}", invocation.command_line());
        let status = Self::command(invocation)
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;
        Ok(status.into())
    }

    fn run_streaming(
        &mut self,
        invocation: &ToolInvocation,
        on_line: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<ToolStatus> {
        debug!("Running (streamed): {}", invocation.command_line());
        // stdout and stderr share one pipe, so lines arrive in write order
        let (reader, writer) = std::io::pipe()?;
        let mut child = {
            let mut command = Self::command(invocation);
            command
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            // The command's copies of the write end close when it drops, so
            // the reader sees EOF once the child exits
            command
                .spawn()
                .map_err(|e| Self::spawn_error(invocation, e))?
        };

        let mut outcome = Ok(());
        for line in BufReader::new(reader).lines() {
            let handled = line.map_err(Error::from).and_then(|line| on_line(&line));
            if let Err(e) = handled {
                outcome = Err(e);
                break;
            }
        }

        if outcome.is_err() {
            let _ = child.kill();
        }
        let status = child.wait()?;
        outcome.map(|()| status.into())
    }
}
