use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::{TempDir, tempdir};

const EXPECTED_ROOT_HELP: &str = "Morsel - Pink Morsel sales preparation

Usage:
  morsel <command>

Start here:
  morsel prepare --help
  morsel prepare
  morsel sales
";

const SCENARIO: &str = "product,price,quantity,date,region
Pink Morsel,$3.00,2,2021-01-10,north
Pink Morsel,$3.00,3,2021-01-10,south
Other,$5.00,1,2021-01-10,north
";

struct CliRun {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

/// A scratch workspace with `data/` and `output/` wired through the environment.
fn workspace() -> Option<TempDir> {
    let dir = tempdir();
    assert!(dir.is_ok());
    let dir = dir.ok()?;
    assert!(fs::create_dir_all(dir.path().join("data")).is_ok());
    Some(dir)
}

fn write_source_file(root: &Path, name: &str, body: &str) -> PathBuf {
    let path = root.join("data").join(name);
    assert!(fs::write(&path, body).is_ok());
    path
}

fn run_cli(root: &Path, args: &[&str]) -> CliRun {
    let mut command = Command::new(env!("CARGO_BIN_EXE_morsel"));
    command.args(args);
    command.current_dir(root);
    command.env("MORSEL_DATA_DIR", root.join("data"));
    command.env("MORSEL_OUTPUT_DIR", root.join("output"));
    command.env_remove("MORSEL_LOG");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = command.output();
    assert!(output.is_ok());
    match output {
        Ok(result) => CliRun {
            success: result.status.success(),
            code: result.status.code(),
            stdout: String::from_utf8(result.stdout).unwrap_or_default(),
            stderr: String::from_utf8(result.stderr).unwrap_or_default(),
        },
        Err(_) => CliRun {
            success: false,
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        },
    }
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "stdout was not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

#[test]
fn bare_invocation_prints_root_help() {
    let Some(dir) = workspace() else { return };
    let run = run_cli(dir.path(), &[]);
    assert!(run.success);
    assert_eq!(run.stdout, EXPECTED_ROOT_HELP);
}

#[test]
fn top_level_help_is_the_guide() {
    let Some(dir) = workspace() else { return };
    let run = run_cli(dir.path(), &["--help"]);
    assert!(run.success);
    assert!(run.stdout.starts_with("Morsel - Pink Morsel sales preparation and daily series"));
    assert!(run.stdout.contains("morsel sales --region north"));
}

#[test]
fn prepare_then_sales_and_regions() {
    let Some(dir) = workspace() else { return };
    let root = dir.path();
    write_source_file(root, "daily_sales_data_0.csv", SCENARIO);

    let prepared = run_cli(root, &["prepare", "--json"]);
    assert!(prepared.success, "stderr: {}", prepared.stderr);
    let payload = parse_json(&prepared.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["command"], Value::from("prepare"));
    assert_eq!(payload["data"]["summary"]["rows_kept"], Value::from(2));

    let body = fs::read_to_string(root.join("output").join("soul_foods_pink_morsel_sales.csv"))
        .unwrap_or_default();
    assert_eq!(
        body,
        "Sales,Date,Region\n6.0,2021-01-10,north\n9.0,2021-01-10,south\n"
    );

    let all = run_cli(root, &["sales", "--json"]);
    assert!(all.success);
    let all_payload = parse_json(&all.stdout);
    assert_eq!(all_payload["data"]["points"][0]["sales"], Value::from(15.0));

    let north = run_cli(root, &["sales", "--region", "north", "--json"]);
    assert!(north.success);
    let north_payload = parse_json(&north.stdout);
    assert_eq!(north_payload["data"]["points"][0]["sales"], Value::from(6.0));

    let east = run_cli(root, &["sales", "--region", "east", "--json"]);
    assert!(east.success);
    let east_payload = parse_json(&east.stdout);
    assert_eq!(east_payload["data"]["outcome"], Value::from("unknown_region"));
    assert_eq!(east_payload["data"]["points"], Value::Array(Vec::new()));

    let regions = run_cli(root, &["regions"]);
    assert!(regions.success);
    assert!(regions.stdout.contains("All (default)"));
    assert!(regions.stdout.contains("North"));
    assert!(regions.stdout.contains("South"));
}

#[test]
fn prepare_text_output_summarizes_the_run() {
    let Some(dir) = workspace() else { return };
    let root = dir.path();
    write_source_file(root, "daily_sales_data_0.csv", SCENARIO);

    let run = run_cli(root, &["prepare"]);
    assert!(run.success);
    assert!(run.stdout.contains("Summary:"));
    assert!(run.stdout.contains("Rows kept:"));
    assert!(run.stdout.contains("Preview (first 2 rows):"));
}

#[test]
fn empty_data_directory_fails_with_exit_code_one() {
    let Some(dir) = workspace() else { return };
    let run = run_cli(dir.path(), &["prepare"]);
    assert!(!run.success);
    assert_eq!(run.code, Some(1));
    assert_text_error_contract(&run.stdout, "empty_input");
}

#[test]
fn sales_before_prepare_reports_missing_file_as_json() {
    let Some(dir) = workspace() else { return };
    let run = run_cli(dir.path(), &["sales", "--json"]);
    assert_eq!(run.code, Some(1));
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["ok"], Value::Bool(false));
    assert_eq!(payload["error"]["code"], Value::from("output_not_found"));
    assert!(payload["data"]["chart"]["title"]
        .as_str()
        .is_some_and(|title| title.contains("Please generate it first.")));
}

#[test]
fn malformed_date_flag_is_invalid_argument() {
    let Some(dir) = workspace() else { return };
    let run = run_cli(dir.path(), &["sales", "--from", "15/01/2021", "--json"]);
    assert_eq!(run.code, Some(1));
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["error"]["code"], Value::from("invalid_argument"));
    assert_eq!(
        payload["error"]["recovery_steps"][0],
        Value::from("Run `morsel sales --help` for usage.")
    );
}

#[test]
fn inverted_date_window_is_invalid_argument() {
    let Some(dir) = workspace() else { return };
    let run = run_cli(
        dir.path(),
        &["sales", "--from", "2021-02-01", "--to", "2021-01-01"],
    );
    assert_eq!(run.code, Some(1));
    assert_text_error_contract(&run.stdout, "invalid_argument");
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let Some(dir) = workspace() else { return };
    let root = dir.path();
    write_source_file(root, "daily_sales_data_0.csv", SCENARIO);

    let run = run_cli(root, &["prepare", "--json", "--verbose"]);
    assert!(run.success);
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert!(run.stderr.contains("wrote sales file"));
}
