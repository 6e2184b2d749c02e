use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary against an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_slate"));
    cmd.args(args);
    cmd.env("SLATE_DATA_DIR", data_dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run an `add` command and return the id it printed.
pub fn add_record(args: &[&str], data_dir: &Path) -> String {
    let stdout = run_cli_success(args, data_dir);
    stdout
        .lines()
        .find(|line| !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()))
        .expect("Could not find record id in output")
        .to_string()
}

/// Parse the JSON lines printed by `list --json`.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}
