/*
 * Responsibility
 * - DB の初期化 (wipe → import → seed → index) を 1 コマンドで流す
 * - 失敗した step を stderr に出して exit code 1、全部成功で 0
 */
use std::process::ExitCode;

use job_board_api::bootstrap::{BootstrapConfig, Pipeline, PipelineError, ProcessRunner};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Process exit status for a pipeline result. Any step failure is 1,
/// whatever code the step itself exited with.
fn exit_status(result: &Result<(), PipelineError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    init_tracing();

    let config = BootstrapConfig::from_env();
    let result = Pipeline::from_config(&config).run(&ProcessRunner);

    match &result {
        Ok(()) => tracing::info!("bootstrap complete"),
        Err(err) => tracing::error!(step = %err.step(), error = %err, "bootstrap failed"),
    }

    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use job_board_api::bootstrap::Step;

    use super::*;

    #[test]
    fn success_exits_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn any_step_failure_exits_one() {
        let failed = Err(PipelineError::StepFailed {
            step: Step::SeedDomainData,
            code: 42,
        });
        let unstartable = Err(PipelineError::Spawn {
            step: Step::Wipe,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });

        assert_eq!(exit_status(&failed), 1);
        assert_eq!(exit_status(&unstartable), 1);
    }
}
