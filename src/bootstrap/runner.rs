//! Child-process execution for bootstrap steps.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

/// An executable plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl StepCommand {
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
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs one step to completion and reports its exit code.
///
/// `Err` only when the process could not be started at all.
pub trait StepRunner {
    fn run(&self, command: &StepCommand) -> io::Result<i32>;
}

/// Spawns the step as a child process sharing our stdin/stdout/stderr and
/// blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl StepRunner for ProcessRunner {
    fn run(&self, command: &StepCommand) -> io::Result<i32> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        // killed by a signal: no code, still a failure
        Ok(status.code().unwrap_or(1))
    }
}
