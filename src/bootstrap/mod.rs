//! Database bootstrap pipeline.
//!
//! Runs four maintenance scripts as child processes, strictly in this order:
//!
//! `Wipe → ImportReferenceData → SeedDomainData → BuildIndexes`
//!
//! The first step that exits non-zero (or cannot be started) stops the run.
//! Completed steps are not rolled back, and no step is retried or timed out.

mod config;
mod runner;

use std::fmt;

use thiserror::Error;

pub use config::BootstrapConfig;
pub use runner::{ProcessRunner, StepCommand, StepRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Wipe,
    ImportReferenceData,
    SeedDomainData,
    BuildIndexes,
}

impl Step {
    /// Execution order.
    pub const ALL: [Step; 4] = [
        Step::Wipe,
        Step::ImportReferenceData,
        Step::SeedDomainData,
        Step::BuildIndexes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Wipe => "wipe",
            Step::ImportReferenceData => "import-reference-data",
            Step::SeedDomainData => "seed-domain-data",
            Step::BuildIndexes => "build-indexes",
        }
    }

    /// Destructive / import steps would otherwise prompt for confirmation.
    pub fn needs_unattended_flag(&self) -> bool {
        matches!(self, Step::Wipe | Step::ImportReferenceData)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("step '{step}' failed with exit code {code}")]
    StepFailed { step: Step, code: i32 },
    #[error("step '{step}' could not be started: {source}")]
    Spawn {
        step: Step,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn step(&self) -> Step {
        match self {
            PipelineError::StepFailed { step, .. } | PipelineError::Spawn { step, .. } => *step,
        }
    }
}

/// The four steps paired with the command that performs each one.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<(Step, StepCommand)>,
}

impl Pipeline {
    pub fn new(command_for: impl Fn(Step) -> StepCommand) -> Self {
        Self {
            steps: Step::ALL.iter().map(|s| (*s, command_for(*s))).collect(),
        }
    }

    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self::new(|step| config.command_for(step))
    }

    /// Run every step in order; return on the first failure.
    pub fn run<R: StepRunner + ?Sized>(&self, runner: &R) -> Result<(), PipelineError> {
        for (step, command) in &self.steps {
            tracing::info!(step = %step, command = %command, "running bootstrap step");

            let code = runner
                .run(command)
                .map_err(|source| PipelineError::Spawn {
                    step: *step,
                    source,
                })?;

            if code != 0 {
                return Err(PipelineError::StepFailed { step: *step, code });
            }
            tracing::info!(step = %step, "bootstrap step done");
        }

        Ok(())
    }
}
