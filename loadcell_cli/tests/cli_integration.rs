use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("loadcell_cli").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("LOADCELL_SIM_VALUES")
        .env_remove("LOADCELL_SIM_FAIL_AT")
        .env_remove("LOADCELL_SIM_OPEN_FAIL");
    cmd
}

fn write_config(dir: &tempfile::TempDir, toml: &str) -> PathBuf {
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["poll", "--help"], 0, "--interval-ms", "stdout")]
#[case(&["poll", "--count", "1", "--forever"], 2, "cannot be used with", "stderr")]
#[case(&["poll", "--count", "0"], 2, "--count", "stderr")]
#[case(&["poll", "--gain", "b64"], 2, "invalid value", "stderr")]
#[case(&["poll", "--clock-pin", "3", "--data-pin", "3"], 2, "must differ", "stderr")]
#[case(&["poll", "--samples", "0"], 2, "poll.samples", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let assert = cmd().args(args).assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn poll_prints_each_reading_on_its_own_line() {
    cmd()
        .env("LOADCELL_SIM_VALUES", "10,-5,0")
        .args(["poll", "--count", "3", "--interval-ms", "10"])
        .assert()
        .success()
        .stdout("10\n-5\n0\n");
}

#[test]
fn failed_poll_halts_and_names_the_poll() {
    cmd()
        .env("LOADCELL_SIM_VALUES", "10,-5,0")
        .env("LOADCELL_SIM_FAIL_AT", "3")
        .args(["poll", "--count", "3", "--interval-ms", "10"])
        .assert()
        .code(4)
        .stdout("10\n-5\n")
        .stderr(predicate::str::contains("Poll 3 failed"));
}

#[test]
fn skip_policy_keeps_polling() {
    cmd()
        .env("LOADCELL_SIM_VALUES", "10,-5,0")
        .env("LOADCELL_SIM_FAIL_AT", "2")
        .args([
            "poll",
            "--count",
            "3",
            "--interval-ms",
            "1",
            "--on-read-error",
            "skip",
        ])
        .assert()
        .success()
        .stdout("10\n-5\n");
}

#[test]
fn retry_policy_recovers() {
    cmd()
        .env("LOADCELL_SIM_VALUES", "10,-5,0")
        .env("LOADCELL_SIM_FAIL_AT", "2")
        .args([
            "poll",
            "--count",
            "3",
            "--interval-ms",
            "1",
            "--on-read-error",
            "retry",
            "--max-retries",
            "2",
        ])
        .assert()
        .success()
        .stdout("10\n-5\n0\n");
}

#[test]
fn open_failure_exits_before_any_reading() {
    cmd()
        .env("LOADCELL_SIM_OPEN_FAIL", "1")
        .args(["poll", "--count", "3", "--interval-ms", "1"])
        .assert()
        .code(3)
        .stdout("")
        .stderr(predicate::str::contains("Could not open the HX711"));
}

#[test]
fn averaging_and_tare_apply_to_output() {
    // Tare takes 10 frames of 100; the polls then average pairs.
    cmd()
        .env("LOADCELL_SIM_VALUES", "100,100,100,100,100,100,100,100,100,100,110,112,90,90")
        .args([
            "poll",
            "--count",
            "2",
            "--interval-ms",
            "1",
            "--samples",
            "2",
            "--tare",
        ])
        .assert()
        .success()
        .stdout("11\n-10\n");
}

#[test]
fn config_file_supplies_defaults_and_flags_override() {
    let dir = tempdir().unwrap();
    let cfg = write_config(
        &dir,
        r#"
[pins]
clock = 5
data = 6

[poll]
count = 4
interval_ms = 1
"#,
    );

    cmd()
        .env("LOADCELL_SIM_VALUES", "1,2,3,4,5")
        .arg("--config")
        .arg(&cfg)
        .arg("poll")
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n");

    cmd()
        .env("LOADCELL_SIM_VALUES", "1,2,3,4,5")
        .arg("--config")
        .arg(&cfg)
        .args(["poll", "--count", "2"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[hardware]\nread_timeout_ms = 0\n");
    cmd()
        .arg("--config")
        .arg(&cfg)
        .args(["poll", "--count", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("read_timeout_ms"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempdir().unwrap();
    cmd()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .args(["poll", "--count", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn self_check_reports_a_reading() {
    cmd()
        .env("LOADCELL_SIM_VALUES", "8421")
        .arg("self-check")
        .assert()
        .success()
        .stdout("ok 8421\n");
}

#[test]
fn log_file_receives_json_lines() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("poller.log");
    let cfg = write_config(
        &dir,
        &format!(
            "[logging]\nfile = {:?}\nlevel = \"debug\"\n",
            log.to_string_lossy()
        ),
    );
    cmd()
        .env("LOADCELL_SIM_VALUES", "7")
        .arg("--config")
        .arg(&cfg)
        .args(["poll", "--count", "2", "--interval-ms", "1"])
        .assert()
        .success()
        .stdout("7\n7\n");

    let text = fs::read_to_string(&log).unwrap();
    let finished = text
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .any(|v| v["fields"]["message"] == "polling finished");
    assert!(finished, "log file lacks the finish event:\n{text}");
}
