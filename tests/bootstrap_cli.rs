//! Runs the `bootstrap` binary against throwaway `sh` scripts.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const STEPS: [&str; 4] = [
    "wipe",
    "import-reference-data",
    "seed-domain-data",
    "build-indexes",
];

/// Every script appends its name (and arguments) to `ran.log`, then exits with
/// the code configured for it.
fn write_scripts(dir: &Path, failing: Option<(&str, i32)>) {
    for step in STEPS {
        let code = match failing {
            Some((name, code)) if name == step => code,
            _ => 0,
        };
        let script = format!("echo \"{step} $*\" >> \"$BOOTSTRAP_TEST_LOG\"\nexit {code}\n");
        fs::write(dir.join(step), script).unwrap();
    }
}

fn run_bootstrap(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bootstrap"))
        .current_dir(dir)
        .env("BOOTSTRAP_SCRIPTS_DIR", dir)
        .env("BOOTSTRAP_INTERPRETER", "sh")
        .env_remove("BOOTSTRAP_SCRIPT_EXTENSION")
        .env("BOOTSTRAP_TEST_LOG", dir.join("ran.log"))
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn ran(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("ran.log"))
        .unwrap_or_default()
        .lines()
        .map(|l| l.trim().to_string())
        .collect()
}

#[test]
fn all_steps_succeed_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), None);

    let out = run_bootstrap(dir.path());

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        ran(dir.path()),
        vec![
            "wipe --yes",
            "import-reference-data --yes",
            "seed-domain-data",
            "build-indexes",
        ]
    );
}

#[test]
fn failing_step_exits_one_and_names_the_step() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), Some(("seed-domain-data", 3)));

    let out = run_bootstrap(dir.path());

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        ran(dir.path()),
        vec![
            "wipe --yes",
            "import-reference-data --yes",
            "seed-domain-data"
        ]
    );

    let stderr = String::from_utf8_lossy(&out.stderr);
    let failure = stderr
        .lines()
        .find(|l| l.contains("bootstrap failed"))
        .unwrap_or_else(|| panic!("no failure line in stderr:\n{stderr}"));
    assert!(failure.contains("seed-domain-data"), "{failure}");
}

#[test]
fn missing_script_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_scripts(dir.path(), None);
    fs::remove_file(dir.path().join("build-indexes")).unwrap();

    let out = run_bootstrap(dir.path());

    // `sh` exits non-zero when the script file does not exist
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(ran(dir.path()).len(), 3);
}
