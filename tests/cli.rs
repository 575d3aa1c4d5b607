//! End-to-end tests for the `syncguard` binary.
//!
//! Each test points the binary at a temp lock, temp log, and a fake sync
//! tool (`sh -c <script>`) supplied through a config file.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use syncguard::audit::{LogEntry, Status, read_entries};
use syncguard::config::Config;
use syncguard::exit_codes;
use syncguard::locks::LockGuard;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(script: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = Config {
            lock_path: dir.path().join("sync.lock"),
            log_path: dir.path().join("logs").join("sync.log"),
            sync_command: shell_words::join(["sh", "-c", script, "sh"]),
        };
        let yaml = serde_yaml::to_string(&config).expect("serialize config");
        fs::write(dir.path().join("syncguard.yaml"), yaml).expect("write config");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn lock_path(&self) -> PathBuf {
        self.path("sync.lock")
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("logs").join("sync.log")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syncguard"));
        cmd.arg("--config").arg(self.path("syncguard.yaml"));
        cmd
    }

    fn entries(&self) -> Vec<LogEntry> {
        read_entries(&self.log_path()).expect("read log")
    }
}

fn wait_for(path: &Path) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !path.exists() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", path.display());
        sleep(Duration::from_millis(20));
    }
}

#[test]
fn success_with_summary_writes_info_entry() {
    let fx = Fixture::new("echo \"upload: $1 -> $2\"");
    let log_path = fx.log_path();

    fx.cmd()
        .args(["--o", "/data", "remote:/bucket"])
        .assert()
        .success()
        .stdout(contains("Well done."))
        .stdout(contains(log_path.to_string_lossy().as_ref()));

    let entries = fx.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, Status::Info);
    assert_eq!(entries[0].message, "Sync successful.");
    assert_eq!(entries[0].extra_info.sync_output, "upload: /data -> remote:/bucket\n");
    assert!(entries[0].extra_info.end_time >= entries[0].extra_info.start_time);
}

#[test]
fn success_without_summary_is_quiet() {
    let fx = Fixture::new("echo noisy tool output");

    let assert = fx.cmd().args(["/data", "remote:/bucket"]).assert().success();
    assert!(assert.get_output().stdout.is_empty());
    assert_eq!(fx.entries().len(), 1);
}

#[test]
fn general_error_reports_exit_code_and_id() {
    let fx = Fixture::new("echo 'fatal error' >&2; exit 1");

    let assert = fx
        .cmd()
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::SYNC_FAILURE)
        .stderr(contains("Exit code 1"))
        .stderr(contains("fatal error"));

    let entries = fx.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, Status::Error);
    assert_eq!(
        entries[0].message,
        "Sync failed due to a general error, exit code 1"
    );

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("stderr utf8");
    assert!(stderr.contains(&format!("UNIQUE_ID {}", entries[0].invocation_id)));
}

#[test]
fn permission_error_is_classified() {
    let fx = Fixture::new("exit 2");

    fx.cmd()
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::SYNC_FAILURE)
        .stderr(contains("Exit code 2"));

    let entries = fx.entries();
    assert!(entries[0].message.contains("permission error"));
}

#[test]
fn other_exit_code_is_reported_by_number() {
    let fx = Fixture::new("exit 13");

    fx.cmd()
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::SYNC_FAILURE);

    assert_eq!(fx.entries()[0].message, "Sync failed with exit code 13");
}

#[test]
fn lock_held_leaves_log_unchanged() {
    let fx = Fixture::new("true");

    fx.cmd().args(["/data", "remote:/bucket"]).assert().success();
    let before = fs::read_to_string(fx.log_path()).expect("read log");

    let _holder = LockGuard::acquire(&fx.lock_path()).expect("hold lock");
    fx.cmd()
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::LOCK_FAILURE)
        .stdout(contains("Error: Could not acquire lock"));

    let after = fs::read_to_string(fx.log_path()).expect("read log");
    assert_eq!(before, after);
}

#[test]
fn concurrent_invocation_is_rejected_not_queued() {
    let fx = Fixture::new("touch \"$3\"; sleep 1");
    let started = fx.path("started");

    let mut first = fx
        .cmd()
        .args(["/data", "remote:/bucket"])
        .arg(&started)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn first run");
    wait_for(&started);

    fx.cmd()
        .args(["/data", "remote:/bucket", "ignored"])
        .assert()
        .code(exit_codes::LOCK_FAILURE)
        .stdout(contains("Could not acquire lock"));

    let status = first.wait().expect("wait first run");
    assert!(status.success());

    let entries = fx.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, Status::Info);
}

#[test]
fn extra_options_are_forwarded_verbatim() {
    let fx = Fixture::new("shift 2; printf '%s|' \"$@\"");

    fx.cmd()
        .args(["/data", "remote:/bucket", "--delete", "--exclude", "*.tmp"])
        .assert()
        .success();

    let entries = fx.entries();
    assert_eq!(entries[0].extra_info.sync_output, "--delete|--exclude|*.tmp|");
    assert_eq!(
        shell_words::split(&entries[0].extra_info.options).expect("split options"),
        vec!["--delete", "--exclude", "*.tmp"]
    );
}

#[test]
fn own_flags_after_destination_go_to_sync_tool() {
    let fx = Fixture::new("shift 2; printf '%s|' \"$@\"");

    fx.cmd()
        .current_dir(fx.dir.path())
        .args(["/data", "remote:/bucket", "--log", "elsewhere.log"])
        .assert()
        .success();

    let entries = fx.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].extra_info.sync_output, "--log|elsewhere.log|");
    assert!(!fx.path("elsewhere.log").exists());
}

#[test]
fn summary_flag_after_destination_is_forwarded() {
    let fx = Fixture::new("shift 2; printf '%s|' \"$@\"");

    let assert = fx
        .cmd()
        .args(["/data", "remote:/bucket", "--o"])
        .assert()
        .success();
    assert!(assert.get_output().stdout.is_empty());

    let entries = fx.entries();
    assert_eq!(entries[0].extra_info.sync_output, "--o|");
    assert_eq!(entries[0].extra_info.options, "--o");
}

#[test]
fn cli_paths_override_config() {
    let fx = Fixture::new("true");
    let lock = fx.path("override.lock");
    let log = fx.path("override.log");

    fx.cmd()
        .arg("--lock")
        .arg(&lock)
        .arg("--log")
        .arg(&log)
        .args(["/data", "remote:/bucket"])
        .assert()
        .success();

    assert!(lock.exists());
    assert_eq!(read_entries(&log).expect("read log").len(), 1);
    assert!(!fx.log_path().exists());
}

#[test]
fn log_write_failure_has_its_own_exit_code() {
    let fx = Fixture::new("true");
    let log_dir = fx.path("not-a-file");
    fs::create_dir_all(&log_dir).expect("create dir");

    fx.cmd()
        .arg("--log")
        .arg(&log_dir)
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::LOG_WRITE_FAILURE)
        .stderr(contains("failed to write audit log"))
        .stderr(contains("UNIQUE_ID"));
}

#[test]
fn sync_failure_is_reported_even_when_log_fails() {
    let fx = Fixture::new("echo broken >&2; exit 1");
    let log_dir = fx.path("not-a-file");
    fs::create_dir_all(&log_dir).expect("create dir");

    fx.cmd()
        .arg("--log")
        .arg(&log_dir)
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::LOG_WRITE_FAILURE)
        .stderr(contains("Exit code 1"))
        .stderr(contains("broken"));
}

#[test]
fn invalid_config_is_user_error() {
    let fx = Fixture::new("true");
    fs::write(fx.path("syncguard.yaml"), "sync_command: \"\"\n").expect("write config");

    fx.cmd()
        .args(["/data", "remote:/bucket"])
        .assert()
        .code(exit_codes::USER_ERROR)
        .stderr(contains("sync_command must not be empty"));

    assert!(!fx.lock_path().exists());
}

#[test]
fn missing_arguments_is_usage_error() {
    let fx = Fixture::new("true");

    fx.cmd()
        .arg("/data")
        .assert()
        .code(exit_codes::USAGE_ERROR);
}
