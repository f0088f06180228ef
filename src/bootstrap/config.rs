use std::path::PathBuf;

use super::{Step, StepCommand};

pub const UNATTENDED_FLAG: &str = "--yes";

/// Where the bootstrap scripts live and how to launch them.
///
/// - `BOOTSTRAP_SCRIPTS_DIR` (default `scripts`)
/// - `BOOTSTRAP_INTERPRETER` (optional, e.g. `node`; scripts are executed directly otherwise)
/// - `BOOTSTRAP_SCRIPT_EXTENSION` (optional, e.g. `js`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub scripts_dir: PathBuf,
    pub interpreter: Option<String>,
    pub script_extension: Option<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            interpreter: None,
            script_extension: None,
        }
    }
}

impl BootstrapConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let non_empty = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            scripts_dir: non_empty("BOOTSTRAP_SCRIPTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.scripts_dir),
            interpreter: non_empty("BOOTSTRAP_INTERPRETER"),
            script_extension: non_empty("BOOTSTRAP_SCRIPT_EXTENSION")
                .map(|ext| ext.trim_start_matches('.').to_string()),
        }
    }

    pub fn script_path(&self, step: Step) -> PathBuf {
        let mut path = self.scripts_dir.join(step.name());
        if let Some(ext) = &self.script_extension {
            path.set_extension(ext);
        }
        path
    }

    pub fn command_for(&self, step: Step) -> StepCommand {
        let script = self.script_path(step).to_string_lossy().into_owned();

        let command = match &self.interpreter {
            Some(interpreter) => StepCommand::new(interpreter.clone()).arg(script),
            None => StepCommand::new(script),
        };

        if step.needs_unattended_flag() {
            command.arg(UNATTENDED_FLAG)
        } else {
            command
        }
    }
}
